use clap::Parser;
use log::info;

use sweep_bdd::dot::DotConfig;
use sweep_bdd::{Diagram, Label};

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Number of queens.
    #[arg(value_name = "INT", default_value = "5")]
    n: u32,

    /// Write the solution diagram to this file in DOT format.
    #[clap(long, value_name = "FILE")]
    dot: Option<std::path::PathBuf>,

    /// Log every sweep.
    #[clap(long)]
    verbose: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        if args.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();
    println!("args = {:?}", args);

    // Encode N-queens problem, one variable per square in row-major order:
    // - One queen per row
    // - At most one queen per column
    // - At most one queen per diagonal
    let n = args.n;
    let var = |i: u32, j: u32| Diagram::var(Label::new(i * n + j));
    let nvar = |i: u32, j: u32| Diagram::nvar(Label::new(i * n + j));

    let mut result = Diagram::sink(true);
    for i in 0..n {
        let mut row = Diagram::sink(false);
        for j in 0..n {
            row = row.or(&var(i, j))?;
        }
        result = result.and(&row)?;
    }
    info!("rows done: {} nodes", result.len());

    for i1 in 0..n {
        for j1 in 0..n {
            for i2 in i1..n {
                for j2 in 0..n {
                    if (i2, j2) <= (i1, j1) {
                        continue;
                    }
                    let same_col = j1 == j2;
                    let same_row = i1 == i2;
                    let same_diag = i1.abs_diff(i2) == j1.abs_diff(j2);
                    if same_row || same_col || same_diag {
                        let not_both = nvar(i1, j1).or(&nvar(i2, j2))?;
                        result = result.and(&not_both)?;
                    }
                }
            }
        }
        info!("constraints for row {} done: {} nodes", i1, result.len());
    }

    println!("res of size {} over {} levels", result.node_count(), result.level_count());
    println!("solutions: {}", result.sat_count(n * n));
    match result.one_sat() {
        Some(model) => {
            let queens: Vec<(u32, u32)> = model
                .iter()
                .filter(|&&(_, value)| value)
                .map(|&(label, _)| (label.index() / n, label.index() % n))
                .collect();
            println!("first solution: {:?}", queens);
        }
        None => println!("no solution"),
    }

    if let Some(path) = args.dot {
        let config = DotConfig {
            use_html_labels: false,
            ..DotConfig::default()
        };
        std::fs::write(&path, result.to_dot_with_config(&config)?)?;
        println!("wrote {}", path.display());
    }

    let time_total = time_total.elapsed();
    println!("\nAll done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
