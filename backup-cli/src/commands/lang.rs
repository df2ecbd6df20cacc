use crate::app::CliApp;
use client_core::error::Result;
use tracing::{info, warn};

/// 查看或保存语言偏好
pub fn handle_lang(app: &CliApp, language: Option<&str>) -> Result<()> {
    let localizer = app.localizer;
    let Some(language) = language else {
        info!(
            "🌐 {}",
            localizer.t_args("lang.current", &[("lang", localizer.active())])
        );
        return Ok(());
    };

    if let Err(e) = localizer.set_preference(language) {
        warn!("{}", localizer.t_args("lang.unknown", &[("lang", language)]));
        return Err(e);
    }
    info!("✅ {}", localizer.t_args("lang.saved", &[("lang", language)]));
    Ok(())
}
