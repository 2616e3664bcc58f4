//! walkv CLI
//!
//! Command-line interface for inspecting and editing a walkv log file.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};
use walkv::{Config, FileLog, Log, Operation, SyncStrategy, WalRecovery, WriteAheadLog};

/// walkv CLI
#[derive(Parser, Debug)]
#[command(name = "walkv")]
#[command(about = "Crash-recoverable key-value store on a write-ahead log")]
#[command(version)]
struct Args {
    /// Log file
    #[arg(short, long, default_value = "./walkv.log")]
    path: PathBuf,

    /// fsync after every write
    #[arg(long)]
    fsync: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key-value pair
    Put {
        /// The key to set
        key: String,

        /// The value to set
        value: String,
    },

    /// Delete a key
    Delete {
        /// The key to delete
        key: String,
    },

    /// List all live key-value pairs
    List,

    /// Check the log without modifying it
    Verify,

    /// Print every record in the log
    Dump,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,walkv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> walkv::Result<()> {
    let sync_strategy = if args.fsync {
        SyncStrategy::EveryWrite
    } else {
        SyncStrategy::OsBuffered
    };

    let config = Config::builder()
        .path(&args.path)
        .sync_strategy(sync_strategy)
        .build();

    match args.command {
        Commands::Get { key } => {
            let wal = WriteAheadLog::open_read_only(&config.path)?;
            match wal.get(key.as_bytes())? {
                Some(value) => println!("{}", String::from_utf8_lossy(&value)),
                None => println!("(nil)"),
            }
        }
        Commands::Put { key, value } => {
            let mut wal = WriteAheadLog::open_with_config(&config)?;
            wal.put(key.as_bytes(), value.as_bytes())?;
            wal.close()?;
            println!("OK");
        }
        Commands::Delete { key } => {
            let mut wal = WriteAheadLog::open_with_config(&config)?;
            wal.delete(key.as_bytes())?;
            wal.close()?;
            println!("OK");
        }
        Commands::List => {
            let wal = WriteAheadLog::open_read_only(&config.path)?;
            let mut pairs: Vec<_> = wal.iter().collect();
            pairs.sort();
            for (key, value) in pairs {
                println!(
                    "{} = {}",
                    String::from_utf8_lossy(key),
                    String::from_utf8_lossy(value)
                );
            }
        }
        Commands::Verify => {
            let stats = WalRecovery::verify(&config.path)?;
            println!("records:  {}", stats.records_replayed);
            println!("puts:     {}", stats.puts);
            println!("deletes:  {}", stats.deletes);
            println!("bytes:    {}", stats.bytes_replayed);
            println!("live:     {}", stats.live_keys);
        }
        Commands::Dump => {
            let mut log = FileLog::open_read_only(&config.path)?;
            for record in log.records() {
                let (offset, payload) = record?;
                println!("{}", dump_line(offset, &payload)?);
            }
        }
    }

    Ok(())
}

/// One `dump` row: offset, payload length, decoded operation
fn dump_line(offset: u64, payload: &[u8]) -> walkv::Result<String> {
    let line = match Operation::decode(payload)? {
        Operation::Put { key, value } => format!(
            "{:>10}  {:>6}  PUT     {} = {}",
            offset,
            payload.len(),
            String::from_utf8_lossy(&key),
            String::from_utf8_lossy(&value)
        ),
        Operation::Delete { key } => format!(
            "{:>10}  {:>6}  DELETE  {}",
            offset,
            payload.len(),
            String::from_utf8_lossy(&key)
        ),
    };
    Ok(line)
}
