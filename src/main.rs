use std::path::PathBuf;

use calcplot::calc::{self, CalcRequest};
use calcplot::plot::DEFAULT_SAMPLE_COUNT;
use calcplot::render::render_svg;
use calcplot::{ComputeService, Config, HttpService, PlotRequest, Plotter, Preset};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "calcplot", version, about = "Calculus service client and function plotter")]
struct Cli {
    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Overrides the computation service url
    #[arg(long, global = true)]
    backend_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Svg,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample a function and draw it
    Plot {
        /// Expression in x, e.g. "sin(x)"
        expression: Option<String>,
        /// sine, parabola or exponential
        #[arg(long, conflicts_with = "expression")]
        preset: Option<Preset>,
        #[arg(long, allow_hyphen_values = true)]
        x_min: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        x_max: Option<f64>,
        #[arg(long, default_value_t = DEFAULT_SAMPLE_COUNT)]
        points: usize,
        #[arg(long, value_enum, default_value = "svg")]
        format: Format,
        /// Write here instead of stdout
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Derivative or integral of an expression
    Calc {
        expression: String,
        #[arg(long)]
        integral: bool,
        #[arg(long, default_value_t = 1)]
        order: u32,
        /// Lower bound of a definite integral
        #[arg(long, allow_hyphen_values = true, requires = "b")]
        a: Option<f64>,
        /// Upper bound of a definite integral
        #[arg(long, allow_hyphen_values = true, requires = "a")]
        b: Option<f64>,
    },
    /// List reading material
    Materials {
        /// Show one topic in full
        slug: Option<String>,
    },
}

fn print_info(message: &str) {
    eprintln!("[calcplot][INFO] {message}");
}

fn print_error(message: &str) {
    eprintln!("[calcplot][ERROR]: {message}");
}

fn load_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let config = config.with_env().with_backend_url(cli.backend_url.clone());
    config.validate()?;
    Ok(config)
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        print_error(&err.to_string());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&cli)?;
    let service = HttpService::from_config(&config);

    match cli.command {
        Commands::Plot {
            expression,
            preset,
            x_min,
            x_max,
            points,
            format,
            out,
        } => {
            let preset = preset.unwrap_or(Preset::SineWave);
            let (default_min, default_max) = preset.domain();
            let expression = expression.unwrap_or_else(|| preset.expression().to_string());
            let request = PlotRequest::new(
                expression,
                x_min.unwrap_or(default_min),
                x_max.unwrap_or(default_max),
                points,
            );

            let plotter = Plotter::new(service).with_surface(config.surface);
            let polyline = plotter.plot(&request)?;
            if polyline.is_empty() {
                print_info("no defined values in this range");
            }

            let document = match format {
                Format::Svg => render_svg(&polyline, &config.surface)?,
                Format::Json => serde_json::to_string_pretty(&polyline)?,
            };
            match out {
                Some(path) => {
                    std::fs::write(&path, document)?;
                    print_info(&format!("wrote {}", path.display()));
                }
                None => println!("{document}"),
            }
        }
        Commands::Calc {
            expression,
            integral,
            order,
            a,
            b,
        } => {
            let request = if integral {
                CalcRequest::integral_between(expression, a, b)
            } else {
                CalcRequest::derivative(expression, order)
            };
            let result = calc::calculate(&service, &request)?;
            if let Some(expression) = &result.result_expression {
                println!("Expression: {expression}");
            }
            if let Some(value) = result.definite_value {
                println!("Value: {value}");
            }
        }
        Commands::Materials { slug } => {
            let topics = service.materials()?;
            match slug {
                Some(slug) => {
                    let topic = calcplot::materials::find(&topics, &slug)
                        .ok_or_else(|| format!("no topic named '{slug}'"))?;
                    println!("{}\n\n{}\n\n{}", topic.title, topic.summary, topic.content);
                    for example in &topic.examples {
                        println!("\nProblem: {}\nSolution: {}", example.problem, example.solution);
                    }
                }
                None if topics.is_empty() => print_info("No materials available"),
                None => {
                    for topic in &topics {
                        println!("{} ({}): {}", topic.title, topic.slug, topic.summary);
                    }
                }
            }
        }
    }
    Ok(())
}
