//! Debate Binary
//!
//! Plays one match between two debaters and prints the transcript and verdict.
//!
//! Options: --motion, --motion-file, --pro, --con, --pro-iterations, --con-iterations,
//! --max-debate-depth, --rounds, --config, --dry-run, --seed

use clap::Parser;
use colored::Colorize;
use robodebate::DEBATE_ROUNDS;
use robodebate::debate::Side;
use robodebate::debate::Winner;
use robodebate::gameroom::Room;
use robodebate::log;
use robodebate::mcts::Config;
use robodebate::oracle::Generator;
use robodebate::oracle::Judge;
use robodebate::oracle::Mock;
use robodebate::oracle::Scorer;
use robodebate::players::Debater;
use robodebate::players::Kind;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about = "Play a two-party debate between search-backed debaters", long_about = None)]
struct Args {
    #[arg(long, default_value = "Remote work is better than office work")]
    motion: String,
    /// read the motion from a text file instead
    #[arg(long, conflicts_with = "motion")]
    motion_file: Option<std::path::PathBuf>,
    #[arg(long, default_value = "true-mcts")]
    pro: Kind,
    #[arg(long, default_value = "baseline")]
    con: Kind,
    #[arg(long)]
    pro_iterations: Option<usize>,
    #[arg(long)]
    con_iterations: Option<usize>,
    #[arg(long)]
    max_debate_depth: Option<usize>,
    #[arg(long, default_value_t = DEBATE_ROUNDS)]
    rounds: usize,
    /// JSON search config; flags override its fields
    #[arg(long)]
    config: Option<std::path::PathBuf>,
    #[arg(long)]
    dry_run: bool,
    #[arg(long)]
    seed: Option<u64>,
}

type Oracles = (Arc<dyn Generator>, Arc<dyn Scorer>, Arc<dyn Judge>);

impl Args {
    fn motion(&self) -> anyhow::Result<String> {
        match self.motion_file {
            None => Ok(self.motion.clone()),
            Some(ref path) => {
                let text = std::fs::read_to_string(path)
                    .map_err(|e| anyhow::anyhow!("read motion {}: {}", path.display(), e))?;
                match text.trim() {
                    "" => anyhow::bail!("motion file {} is empty", path.display()),
                    motion => Ok(motion.to_string()),
                }
            }
        }
    }

    fn config(&self) -> anyhow::Result<Config> {
        let mut config = match self.config {
            Some(ref path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(depth) = self.max_debate_depth {
            config = config.with_debate_depth(depth);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if self.dry_run {
            config = config.with_dry_run(true);
        }
        config.validate()
    }

    fn oracles(&self, config: &Config) -> anyhow::Result<Oracles> {
        if config.dry_run {
            let mock = Arc::new(Mock::new(config.seed));
            let oracles: Oracles = (mock.clone(), mock.clone(), mock);
            Ok(oracles)
        } else {
            live()
        }
    }
}

#[cfg(feature = "llm")]
fn live() -> anyhow::Result<Oracles> {
    let llm = Arc::new(robodebate::oracle::Llm::from_env()?);
    let oracles: Oracles = (llm.clone(), llm.clone(), llm);
    Ok(oracles)
}

#[cfg(not(feature = "llm"))]
fn live() -> anyhow::Result<Oracles> {
    anyhow::bail!("live debates need an oracle: rebuild with --features llm or pass --dry-run")
}

fn main() -> anyhow::Result<()> {
    log();
    let args = Args::parse();
    let motion = args.motion()?;
    let config = args.config()?;
    let (generator, scorer, judge) = args.oracles(&config)?;
    let debater = |kind: Kind, side: Side, iterations: Option<usize>| {
        let config = match iterations {
            Some(n) => config.clone().with_iterations(n),
            None => config.clone(),
        };
        config.validate().map(|config| {
            Debater::build(kind, side, &motion, config, generator.clone(), scorer.clone())
        })
    };
    let pro = debater(args.pro, Side::Pro, args.pro_iterations)?;
    let con = debater(args.con, Side::Con, args.con_iterations)?;
    log::info!(
        "motion: {} | pro: {} | con: {} | rounds: {}",
        motion,
        args.pro,
        args.con,
        args.rounds
    );
    let (verdict, transcript) = Room::new(pro, con, judge, args.rounds).play();
    println!("{}", motion.bold());
    for (index, line) in transcript.iter().enumerate() {
        match Side::at(index) {
            Side::Pro => println!("{}", line.green()),
            Side::Con => println!("{}", line.red()),
        }
    }
    let winner = match verdict.winner {
        Winner::A => format!("pro ({})", args.pro).green(),
        Winner::B => format!("con ({})", args.con).red(),
        Winner::Draw => "draw".to_string().yellow(),
    };
    println!("winner: {}", winner.bold());
    println!("{}", verdict);
    Ok(())
}
