use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

use georoute::config::environment::EnvironmentConfig;
use georoute::repositories::InMemoryRouteStore;
use georoute::routes::create_app_router;
use georoute::services::OrsOptimizationService;
use georoute::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    let level = config.log_level.parse().unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🗺️ GeoRoute - Optimizador de rutas de reparto");
    info!("=============================================");
    info!("🌍 Entorno: {}", config.environment);

    let optimizer = OrsOptimizationService::from_config(&config)?;
    if !optimizer.is_configured() {
        warn!("⚠️ ORS_API_KEY no configurada: /api/route/optimize va a fallar");
    }

    let addr: SocketAddr = config.server_url().parse()?;
    let app_state = AppState::new(
        config,
        Arc::new(optimizer),
        Arc::new(InMemoryRouteStore::new()),
    );
    let app = create_app_router(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /test - Endpoint de prueba");
    info!("🧭 Optimización:");
    info!("   POST /api/route/optimize - Optimizar orden de visita");
    info!("   POST /api/route/sheet - Hoja de ruta para compartir");
    info!("   GET  /api/route/health - Health check");
    info!("💾 Rutas guardadas:");
    info!("   GET  /api/saved-routes - Listar rutas");
    info!("   POST /api/saved-routes - Guardar ruta");
    info!("   GET  /api/saved-routes/stats - Estadísticas de gerencia");
    info!("   GET  /api/saved-routes/:id - Obtener ruta");
    info!("   DELETE /api/saved-routes/:id - Eliminar ruta");
    info!("🗂️ Sesión de planificación:");
    info!("   GET  /api/planner - Estado de la sesión");
    info!("   POST /api/planner/stops - Agregar parada");
    info!("   PATCH /api/planner/stops/:id - Editar parada");
    info!("   DELETE /api/planner/stops/:id - Quitar parada");
    info!("   PUT  /api/planner/stops/:id/depot - Elegir depósito");
    info!("   POST /api/planner/load/:id - Cargar ruta guardada");
    info!("   POST /api/planner/optimize - Optimizar la sesión");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el manejador de señales: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
