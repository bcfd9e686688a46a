use anyhow::Result;
use catlist::{SnapshotWriter, VirtualSource};
use std::env;
use tracing_subscriber::EnvFilter;

struct Config {
    levels: usize,
    min_children: usize,
    max_children: usize,
    max_rows: usize,
    seed: u64,
    sort_dimension: bool,
    output_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            levels: 3,
            min_children: 2,
            max_children: 6,
            max_rows: 12,
            seed: 42,
            sort_dimension: false,
            output_file: "categories.json".to_string(),
        }
    }
}

/// Returns the value following a flag, advancing the cursor.
fn flag_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str> {
    *i += 1;
    match args.get(*i) {
        Some(value) => Ok(value.as_str()),
        None => anyhow::bail!("{} requires an argument", flag),
    }
}

/// Parses generator arguments (without the program name).
///
/// Returns `None` when help was requested.
fn parse_args(args: &[String]) -> Result<Option<Config>> {
    let mut config = Config::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-levels" => {
                config.levels = flag_value(args, &mut i, "-levels")?.parse()?;
            }
            "-children" => {
                config.min_children = flag_value(args, &mut i, "-children")?.parse()?;
                // An optional second number makes it a range
                config.max_children = match args.get(i + 1).map(|s| s.parse::<usize>()) {
                    Some(Ok(max)) => {
                        i += 1;
                        max
                    }
                    _ => config.min_children,
                };
            }
            "-rows" => {
                config.max_rows = flag_value(args, &mut i, "-rows")?.parse()?;
            }
            "-seed" => {
                config.seed = flag_value(args, &mut i, "-seed")?.parse()?;
            }
            "-sort" => {
                config.sort_dimension = true;
            }
            "-out" => {
                config.output_file = flag_value(args, &mut i, "-out")?.to_string();
            }
            "-h" | "-help" | "--help" => {
                return Ok(None);
            }
            other => {
                tracing::warn!("unknown argument: {}", other);
            }
        }
        i += 1;
    }

    if config.min_children > config.max_children {
        anyhow::bail!(
            "-children range is empty ({} > {})",
            config.min_children,
            config.max_children
        );
    }
    Ok(Some(config))
}

fn print_help() {
    println!("Category Snapshot Generator");
    println!("Usage: catlist-gen [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -levels <N>            Number of hierarchy levels (default: 3)");
    println!("  -children <N> [M]      Children per internal node (default: 2 6)");
    println!("                         If two numbers provided, picks a random count in range [N, M]");
    println!("  -rows <N>              Maximum data rows per leaf (default: 12)");
    println!("  -seed <N>              Random seed (default: 42)");
    println!("  -sort                  Attach a numeric sort value to every leaf");
    println!("  -out <FILE>            Output file path (default: categories.json)");
    println!("                         A .br suffix writes a Brotli-compressed snapshot");
    println!("  -h, -help, --help      Show this help message");
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(config) = parse_args(&args)? else {
        print_help();
        return Ok(());
    };

    let source = VirtualSource::with_config(
        config.levels,
        config.min_children,
        config.max_children,
        config.max_rows,
        config.seed,
    )
    .with_sort_dimension(config.sort_dimension);

    let snapshot = source.generate();
    SnapshotWriter::new(&config.output_file)?.write(&snapshot)?;

    println!("Snapshot written to: {}", config.output_file);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = parse_args(&[]).unwrap().unwrap();
        assert_eq!(config.levels, 3);
        assert_eq!(config.seed, 42);
        assert!(!config.sort_dimension);
        assert_eq!(config.output_file, "categories.json");
    }

    #[test]
    fn test_children_range() {
        let config = parse_args(&args(&["-children", "3", "5", "-sort"])).unwrap().unwrap();
        assert_eq!((config.min_children, config.max_children), (3, 5));
        assert!(config.sort_dimension);

        let config = parse_args(&args(&["-children", "4", "-levels", "2"])).unwrap().unwrap();
        assert_eq!((config.min_children, config.max_children), (4, 4));
        assert_eq!(config.levels, 2);
    }

    #[test]
    fn test_missing_value_is_an_error() {
        assert!(parse_args(&args(&["-out"])).is_err());
        assert!(parse_args(&args(&["-rows", "many"])).is_err());
        assert!(parse_args(&args(&["-children", "5", "2"])).is_err());
    }

    #[test]
    fn test_help() {
        assert!(parse_args(&args(&["-h"])).unwrap().is_none());
    }
}
