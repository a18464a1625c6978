use anyhow::{bail, Context};
use chrono_humanize::HumanTime;
use std::path::Path;
use std::process::ExitCode;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::MakeWriterExt;

use world_status::{Config, RecordGroup, Region, StatusService, WorldRecord};

const DEFAULT_CONFIG: &str = "./config.toml";

const USAGE: &str = "usage: world-status [config.toml] <command> [arg] [--json]

commands:
  world <name>     status of one world
  dc <name>        worlds of one data center
  region <code>    data centers of a region (na, eu, jp, oc)
  list             all data centers
  flat             all worlds
  stats            cache state after a refresh";

#[tokio::main]
async fn main() -> ExitCode {
    // 로깅 초기화: 콘솔 + 일별 로테이션 파일
    let _guard = match init_logging() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let json = match args.iter().position(|a| a == "--json") {
        Some(i) => {
            args.remove(i);
            true
        }
        None => false,
    };

    let config_path = match args.first() {
        Some(first) if first.ends_with(".toml") => Some(args.remove(0)),
        _ => None,
    };

    let config = match load_config(config_path.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load config: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&config, &args, json).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging() -> anyhow::Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::Builder::new()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .filename_prefix("world-status")
        .filename_suffix("log")
        .build("logs")
        .context("initializing rolling file appender failed")?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr.and(non_blocking))
        .with_ansi(true)
        .init();

    Ok(guard)
}

async fn load_config(path: Option<&str>) -> anyhow::Result<Config> {
    match path {
        Some(path) => get_config(path).await,
        None if Path::new(DEFAULT_CONFIG).exists() => get_config(DEFAULT_CONFIG).await,
        None => {
            tracing::info!("no config file, using defaults");
            Ok(Config::default())
        }
    }
}

async fn get_config<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
    let mut f = File::open(path)
        .await
        .context("could not open config file")?;
    let mut toml = String::new();
    f.read_to_string(&mut toml)
        .await
        .context("could not read config file")?;
    let config = toml::from_str(&toml).context("could not parse config file")?;

    Ok(config)
}

async fn run(config: &Config, args: &[String], json: bool) -> anyhow::Result<()> {
    let service = StatusService::from_config(config)?;

    let command = args.first().map(String::as_str);
    let arg = args.get(1..).map(|rest| rest.join(" ")).unwrap_or_default();

    match command {
        Some("world") if !arg.is_empty() => match service.find_world(&arg).await? {
            Some(world) if json => print_json(&world)?,
            Some(world) => println!("{}", describe_world(&world)),
            None => bail!("no world named {:?}", arg),
        },
        Some("dc") if !arg.is_empty() => match service.find_group(&arg).await? {
            Some(group) if json => print_json(&group)?,
            Some(group) => print_groups(std::slice::from_ref(&group)),
            None => bail!("no data center named {:?}", arg),
        },
        Some("region") if !arg.is_empty() => {
            let region: Region = arg.parse()?;
            let groups = service.list_by_region(region).await?;
            if json {
                print_json(&groups)?;
            } else if groups.is_empty() {
                println!("no data centers in {}", region);
            } else {
                print_groups(&groups);
            }
        }
        Some("list") => {
            let groups = service.list_all().await?;
            if json {
                print_json(&groups)?;
            } else {
                print_groups(&groups);
            }
        }
        Some("flat") => {
            let worlds = service.list_flat().await?;
            if json {
                print_json(&worlds)?;
            } else {
                for world in &worlds {
                    println!("{}", describe_world(world));
                }
            }
        }
        Some("stats") => {
            service.refresh().await?;
            let stats = service.cache_stats();
            if json {
                print_json(&stats)?;
            } else {
                let updated = stats
                    .captured_at
                    .map(|at| HumanTime::from(at).to_string())
                    .unwrap_or_else(|| "never".to_string());
                println!(
                    "cached: {}, fresh: {}, updated {}, ttl {}s",
                    stats.has_data,
                    stats.is_fresh,
                    updated,
                    stats.ttl_ms / 1000
                );
            }
        }
        _ => bail!("{}", USAGE),
    }

    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_groups(groups: &[RecordGroup]) {
    for group in groups {
        println!("{} [{}]", group.name(), group.region());
        for world in group.worlds() {
            println!("  {}", describe_world(world));
        }
    }
}

fn describe_world(world: &WorldRecord) -> String {
    format!(
        "{:<16} {:<12} {:<11} {}",
        world.name().as_str(),
        world.availability().to_string(),
        world.population().to_string(),
        if world.character_creation_open() {
            "creation open"
        } else {
            "creation closed"
        }
    )
}
