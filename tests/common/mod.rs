use fileservelib::server::{ResourceTable, ServerConfig};
use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

pub async fn _create_table(
    files: &[(&str, &str)],
) -> Result<ResourceTable, Box<dyn std::error::Error>> {
    //Several tests share one process, only the first logger wins
    CombinedLogger::init(vec![TermLogger::new(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )])
    .ok();

    let table = ResourceTable::new(ServerConfig::default());
    for (name, content) in files {
        table.create(name, content).await?;
    }

    Ok(table)
}
