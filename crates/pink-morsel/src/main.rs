mod bootstrap;
mod report;

use anyhow::Result;
use sales_core::settings::{Command, Settings};
use sales_runtime::dataset::SalesDataset;
use sales_runtime::pipeline::run_transform;
use sales_ui::app::App;
use sales_ui::chart_view::ChartStyle;

fn main() -> Result<()> {
    let settings = Settings::load();

    let console = !matches!(settings.command, Command::Dashboard(_));
    let target = bootstrap::log_target(settings.log_file.as_deref(), console);
    bootstrap::setup_logging(&settings.log_level, target)?;

    tracing::info!("Pink Morsel v{} starting", env!("CARGO_PKG_VERSION"));

    match &settings.command {
        Command::Transform(args) => {
            let result = run_transform(args)?;
            print!("{}", report::render_transform_summary(&result));
        }

        Command::Report(args) => {
            let dataset = SalesDataset::load(&args.input)?;
            let summary = dataset.query(args.region);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", report::render_text_report(args.region, &summary));
            }
        }

        Command::Dashboard(args) => {
            let dataset = SalesDataset::load(&args.input)?;
            let chart_style: ChartStyle = args.chart_style.parse()?;
            tracing::info!(
                "Dashboard: region {}, theme {}, chart style {}",
                args.region,
                args.theme,
                chart_style
            );
            App::new(&args.theme, chart_style, args.region).run(&dataset)?;
        }
    }

    Ok(())
}
