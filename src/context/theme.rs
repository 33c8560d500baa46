//! Theme preference service.

use tokio::sync::watch;

use super::PersistentState;
use crate::db::{keys, LocalStore};
use crate::errors::AppError;
use crate::models::Theme;

/// Site theme, persisted under [`keys::THEME`].
pub struct ThemeService {
    state: PersistentState<Theme>,
}

impl ThemeService {
    pub async fn load(store: LocalStore) -> Self {
        Self {
            state: PersistentState::load(store, keys::THEME, Theme::default()).await,
        }
    }

    pub async fn theme(&self) -> Theme {
        self.state.get().await
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<Theme, AppError> {
        self.state.update(|_| theme).await
    }

    /// Flip light/dark, keeping the colors.
    pub async fn toggle(&self) -> Result<Theme, AppError> {
        let theme = self
            .state
            .update(|current| Theme {
                mode: current.mode.flipped(),
                ..current.clone()
            })
            .await?;
        tracing::info!("Theme switched to {:?}", theme.mode);
        Ok(theme)
    }

    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.state.subscribe()
    }
}
