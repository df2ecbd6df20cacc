use crate::app::CliApp;
use crate::project_info::get_version_string;
use client_core::error::Result;

/// 显示API配置信息
pub fn show_api_info(app: &CliApp) -> Result<()> {
    println!("{}", get_version_string());
    print!("{}", app.config.server);
    Ok(())
}
