use clap::{ArgAction, Parser};
use knockout::engine::BracketEngine;
use knockout::image::{render, ColorScheme};
use knockout::layout;
use knockout::types::AppResult;
use log::LevelFilter;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Parser, Debug)]
#[clap(name="Knockout", about = "Single-elimination brackets rendered as images", author, version, long_about = None)]
struct Args {
    #[clap(long, short='n', action=ArgAction::Set, default_value_t = 8, help = "Number of players, must be a power of two")]
    players: u32,
    #[clap(long, action=ArgAction::Set, help = "Set random seed for the play-out")]
    seed: Option<u64>,
    #[clap(long, short='p', action=ArgAction::Set, help = "Stop after this many declared results instead of playing out the whole bracket")]
    play: Option<usize>,
    #[clap(long, short='o', action=ArgAction::Set, default_value = "bracket.png", help = "Output image path")]
    output: String,
    #[clap(long, short='j', action=ArgAction::SetTrue, help = "Print the computed geometry as JSON instead of saving an image")]
    json: bool,
}

fn main() -> AppResult<()> {
    let logfile = FileAppender::builder()
        .append(false)
        .encoder(Box::new(PatternEncoder::new("{l} - {m}\n")))
        .build("knockout.log")?;

    let config = Config::builder()
        .appender(Appender::builder().build("logfile", Box::new(logfile)))
        .build(Root::builder().appender("logfile").build(LevelFilter::Info))?;

    log4rs::init_config(config)?;
    let args = Args::parse();

    let players: Vec<_> = (1..=args.players).collect();
    let names = players.iter().map(|id| format!("Player {id}")).collect();
    let mut bracket = BracketEngine::new(players, names)?;

    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_os_rng(),
    };

    let mut declared = 0;
    'play: loop {
        let Some(pairs) = bracket.current_round().map(|r| r.matches().to_vec()) else {
            break;
        };
        for pair in pairs {
            if args.play.is_some_and(|limit| declared >= limit) {
                break 'play;
            }
            if rng.random_bool(0.5) {
                bracket.declare_winner(pair.home)?;
            } else {
                bracket.declare_loser(pair.home)?;
            }
            declared += 1;
        }
    }

    if let Some(champion) = bracket.champion() {
        println!("Champion: {}", bracket.name_of(champion));
    } else {
        println!(
            "Stopped in round {} of {}",
            bracket.round_number() + 1,
            bracket.round_count()
        );
    }

    let geometry = layout::compute(&bracket.snapshot())?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&geometry)?);
    } else {
        render(&geometry, &ColorScheme::default()).save(&args.output)?;
        println!("Saved bracket to {}", args.output);
    }

    Ok(())
}
