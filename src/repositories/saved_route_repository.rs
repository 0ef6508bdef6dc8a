use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::saved_route::SavedRoute;
use crate::utils::errors::AppError;

/// Almacenamiento de rutas guardadas
///
/// Se inyecta en el estado de la aplicación; la persistencia real (nube,
/// base de datos) queda detrás de esta interfaz.
#[async_trait]
pub trait RouteStore: Send + Sync {
    /// Todas las rutas, la más reciente primero
    async fn list(&self) -> Result<Vec<SavedRoute>, AppError>;
    async fn get(&self, id: &str) -> Result<Option<SavedRoute>, AppError>;
    async fn save(&self, route: SavedRoute) -> Result<SavedRoute, AppError>;
    /// `true` si la ruta existía
    async fn delete(&self, id: &str) -> Result<bool, AppError>;
}

#[derive(Clone, Default)]
pub struct InMemoryRouteStore {
    routes: Arc<RwLock<Vec<SavedRoute>>>,
}

impl InMemoryRouteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RouteStore for InMemoryRouteStore {
    async fn list(&self) -> Result<Vec<SavedRoute>, AppError> {
        let routes = self.routes.read().await;
        let mut sorted = routes.clone();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sorted)
    }

    async fn get(&self, id: &str) -> Result<Option<SavedRoute>, AppError> {
        let routes = self.routes.read().await;
        Ok(routes.iter().find(|r| r.id == id).cloned())
    }

    async fn save(&self, route: SavedRoute) -> Result<SavedRoute, AppError> {
        let mut routes = self.routes.write().await;
        log::info!("💾 Ruta guardada: {} ({} paradas)", route.name, route.stop_count);
        routes.push(route.clone());
        Ok(route)
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let mut routes = self.routes.write().await;
        let before = routes.len();
        routes.retain(|r| r.id != id);
        let deleted = routes.len() < before;
        if deleted {
            log::info!("🗑️ Ruta eliminada: {}", id);
        }
        Ok(deleted)
    }
}
