//! Servicio para la API de optimización de openrouteservice
//!
//! Este módulo maneja la comunicación con el optimizador externo. Es la
//! única suspensión del ciclo de optimización: una llamada HTTP por pedido
//! del usuario, sin reintentos.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::config::environment::EnvironmentConfig;
use crate::dto::ors_optimization_dto::*;
use crate::utils::errors::{OptimizationError, INFEASIBLE_HINT};

/// Transporte hacia el optimizador
///
/// Permite reemplazar el servicio HTTP por uno guionado en los tests.
#[async_trait]
pub trait OptimizationTransport: Send + Sync {
    async fn submit(
        &self,
        request: &OrsOptimizationRequest,
    ) -> Result<OrsOptimizationResponse, OptimizationError>;
}

pub struct OrsOptimizationService {
    api_key: Option<String>,
    base_url: String,
    client: Client,
}

impl OrsOptimizationService {
    pub fn new(
        api_key: Option<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, OptimizationError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("GeoRoute/1.0")
            .build()?;

        Ok(Self {
            api_key: api_key
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &EnvironmentConfig) -> Result<Self, OptimizationError> {
        Self::new(
            config.ors_api_key.clone(),
            config.ors_base_url.clone(),
            Duration::from_secs(config.optimizer_timeout_secs),
        )
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn optimization_url(&self) -> String {
        format!("{}/optimization", self.base_url)
    }
}

#[async_trait]
impl OptimizationTransport for OrsOptimizationService {
    async fn submit(
        &self,
        request: &OrsOptimizationRequest,
    ) -> Result<OrsOptimizationResponse, OptimizationError> {
        let api_key = self.api_key.as_deref().ok_or(OptimizationError::MissingApiKey)?;
        let url = self.optimization_url();

        log::info!(
            "📤 Enviando {} trabajos al optimizador: {}",
            request.jobs.len(),
            url
        );
        if log::log_enabled!(log::Level::Debug) {
            log::debug!("📋 Request body: {}", serde_json::to_string(request)?);
        }

        let response = self
            .client
            .post(&url)
            .query(&[("api_key", api_key)])
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        log::info!("📡 Optimizer response status: {}", status);
        log::debug!("📄 Optimizer response body: {}", response_text);

        if !status.is_success() {
            let message = error_message(&response_text);

            return Err(OptimizationError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: OrsOptimizationResponse = serde_json::from_str(&response_text)?;

        if !parsed.is_solved() {
            let message = error_message(&response_text);
            log::warn!("⚠️ Optimizador respondió code {:?}: {}", parsed.code, message);

            return Err(OptimizationError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        log::info!(
            "🎯 Solución recibida: {} rutas, {} sin asignar",
            parsed.routes.len(),
            parsed.unassigned.len()
        );

        Ok(parsed)
    }
}

/// Mensaje legible de un cuerpo de error; sin mensaje se sugiere revisar horarios
fn error_message(body: &str) -> String {
    serde_json::from_str::<OrsErrorPayload>(body)
        .map(|payload| payload.message())
        .unwrap_or_else(|_| INFEASIBLE_HINT.to_string())
}
