use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::service::notify::NotificationSender;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub http: reqwest::Client,
    pub notifier: Arc<dyn NotificationSender>,
}
