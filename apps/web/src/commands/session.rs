//! # Session Commands

use stockroom_core::AccessDecision;
use tracing::info;

use crate::error::AppResult;
use crate::state::InventoryApp;

/// Logs out: forgets the stored admin flag and drops privileges.
///
/// ## Returns
/// The page to navigate to (the configured start page).
pub async fn logout(app: &mut InventoryApp) -> AppResult<String> {
    app.db().session().clear_admin_flag().await?;

    app.access = AccessDecision::anonymous();
    app.modals.close_all();
    app.form.cancel();

    let target = app.config().start_page.clone();
    info!(target = %target, "Logged out");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppConfig;
    use stockroom_db::{Database, DbConfig};

    #[tokio::test]
    async fn test_logout_clears_flag_and_privileges() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.session().set_admin_flag(true).await.unwrap();
        let config = AppConfig {
            start_page: "login.html".to_string(),
            ..AppConfig::default()
        };
        let mut app = InventoryApp::start(db.clone(), config, "").await.unwrap();
        assert!(app.access().privileged);

        let target = logout(&mut app).await.unwrap();

        assert_eq!(target, "login.html");
        assert!(!app.visibility().show_delete);
        assert_eq!(db.session().admin_flag().await.unwrap(), None);
    }
}
