//Vendor Imports
#[macro_use]
extern crate log;
extern crate simplelog;
use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode};

//Application Imports
use fileservelib::server::{ResourceTable, ServerConfig};
use fileservelib::workload::{Workload, WorkloadConfig};

const SEED_FILES: [(&str, &str); 4] = [
    ("a", "hello"),
    ("b", "world"),
    ("c", "coheed"),
    ("d", "cambria"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    CombinedLogger::init(vec![TermLogger::new(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )])?;

    info!("Starting the file server workload");

    let table = ResourceTable::new(ServerConfig::default());
    for (name, content) in SEED_FILES.iter() {
        table.create(name, content).await?;
    }

    let report = Workload::new(WorkloadConfig::default())
        .run(table.clone())
        .await?;
    info!("Completed {0} reads and {1} writes", report.reads, report.writes);

    let mut names: Vec<String> = table.names().await.into_iter().collect();
    names.sort();
    for name in names {
        info!("File {0} is {1}", name, table.status(&name).await);
    }

    Ok(())
}
