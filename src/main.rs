use easy_look_logo::font_fetch::FontFetcher;
use easy_look_logo::{LogoConfig, LogoRenderer};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::init(); // Initialize logger

    let config = LogoConfig::load();
    let fetcher = FontFetcher::new(config.font_url.clone());
    let renderer = LogoRenderer::new(config);

    match renderer.run(&fetcher).await {
        Ok(report) => {
            println!("[OK] Logo created successfully!");
            println!("  Saved to: {}", report.output_path.display());
            println!("  Size: {}x{} pixels", report.width, report.height);
            println!("  Font: {}", report.font);
            if report.used_fallback_metrics {
                println!("  Layout: default metrics");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ Failed to write logo: {}", e);
            ExitCode::FAILURE
        }
    }
}
