//! Bounce Bot Duel headless driver
//!
//! Plays a batch of launches against the bot on the built-in physics
//! sandbox, banking coins and achievements into a preference file.
//!
//! ```text
//! bounce-bot-duel [--config PATH] [--prefs PATH] [--launches N] [--seed N]
//! ```

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use bounce_bot_duel::consts::SIM_DT;
    use bounce_bot_duel::meta::{MetaEvent, MetaGame, achievements};
    use bounce_bot_duel::sim::{Competitor, RoundEvent, RoundPhase, SimpleWorld, TickInput};
    use bounce_bot_duel::{GameConfig, Session, platform};

    /// Give up on a launch whose balls never leave the board
    const MAX_TICKS_PER_LAUNCH: u32 = 60 * 60;

    #[derive(Debug)]
    struct Args {
        config: Option<PathBuf>,
        prefs: PathBuf,
        launches: u32,
        seed: Option<u64>,
    }

    impl Args {
        fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
            let mut parsed = Args {
                config: None,
                prefs: PathBuf::from("bounce_bot_duel_prefs.json"),
                launches: 20,
                seed: None,
            };
            while let Some(flag) = args.next() {
                let mut value = || args.next().ok_or_else(|| format!("{flag} needs a value"));
                match flag.as_str() {
                    "--config" => parsed.config = Some(PathBuf::from(value()?)),
                    "--prefs" => parsed.prefs = PathBuf::from(value()?),
                    "--launches" => {
                        parsed.launches = value()?
                            .parse()
                            .map_err(|e| format!("bad --launches: {e}"))?
                    }
                    "--seed" => {
                        parsed.seed = Some(value()?.parse().map_err(|e| format!("bad --seed: {e}"))?)
                    }
                    other => return Err(format!("unknown argument {other}")),
                }
            }
            Ok(parsed)
        }
    }

    #[derive(Debug, Default)]
    struct Tally {
        coins_collected: u32,
        bot_coins: u32,
        levels_won: u32,
        game_overs: u32,
    }

    impl Tally {
        fn record(&mut self, event: &RoundEvent) {
            match event {
                RoundEvent::CoinCollected { .. } => self.coins_collected += 1,
                RoundEvent::CoinClaimed { by: Competitor::Bot } => self.bot_coins += 1,
                RoundEvent::LevelWon { .. } => self.levels_won += 1,
                RoundEvent::GameOver { .. } => self.game_overs += 1,
                _ => {}
            }
        }
    }

    pub fn run() -> Result<(), String> {
        platform::init_logging();
        let args = Args::parse(std::env::args().skip(1))?;

        let config = match &args.config {
            Some(path) => GameConfig::load_or_default(path),
            None => GameConfig::default(),
        };
        let seed = args.seed.unwrap_or_else(rand::random);
        let store = platform::open_store(&args.prefs);
        let mut session = Session::new(SimpleWorld::new(), &config, store, seed);

        log::info!("Bounce Bot Duel (headless) starting, {} launches", args.launches);

        let mut tally = Tally::default();
        for _ in 0..args.launches {
            match session.state().phase {
                RoundPhase::GameOver => session.step(&TickInput {
                    restart: true,
                    ..Default::default()
                }),
                RoundPhase::LevelComplete => session.step(&TickInput {
                    next_level: true,
                    ..Default::default()
                }),
                RoundPhase::Idle | RoundPhase::InFlight => {}
            }

            session.tap();
            let mut ticks = 0;
            loop {
                session.update(SIM_DT);
                ticks += 1;
                if session.state().phase != RoundPhase::InFlight {
                    break;
                }
                if ticks >= MAX_TICKS_PER_LAUNCH {
                    log::warn!("Launch did not settle, restarting level");
                    session.step(&TickInput {
                        restart: true,
                        ..Default::default()
                    });
                    break;
                }
            }

            for event in session.drain_events() {
                log::debug!("{:?}", event);
                tally.record(&event);
            }
            for event in session.drain_meta_events() {
                match event {
                    MetaEvent::AchievementUnlocked { id, bonus } => {
                        log::info!("Achievement: {} (+{} coins)", id.name(), bonus)
                    }
                    MetaEvent::CoinsBanked { amount, total } => {
                        log::info!("Banked {} coins, wallet {}", amount, total)
                    }
                }
            }
        }

        let state = session.state();
        log::info!(
            "Done: level {}, {} coins collected, bot took {}, {} levels won, {} game overs",
            state.current_level,
            tally.coins_collected,
            tally.bot_coins,
            tally.levels_won,
            tally.game_overs
        );
        log::info!(
            "Wallet {} coins, {} lifetime wins, {} achievements",
            session.balance(),
            MetaGame::matches_won(session.store()),
            achievements::unlocked(session.store()).len()
        );
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn parse(args: &[&str]) -> Result<Args, String> {
            Args::parse(args.iter().map(|s| s.to_string()))
        }

        #[test]
        fn test_defaults() {
            let args = parse(&[]).unwrap();
            assert_eq!(args.launches, 20);
            assert_eq!(args.seed, None);
            assert!(args.config.is_none());
        }

        #[test]
        fn test_all_flags() {
            let args = parse(&["--seed", "9", "--launches", "3", "--prefs", "p.json"]).unwrap();
            assert_eq!(args.seed, Some(9));
            assert_eq!(args.launches, 3);
            assert_eq!(args.prefs, PathBuf::from("p.json"));
        }

        #[test]
        fn test_tally_counts_bot_claims() {
            let mut tally = Tally::default();
            tally.record(&RoundEvent::CoinClaimed {
                by: Competitor::Bot,
            });
            tally.record(&RoundEvent::CoinClaimed {
                by: Competitor::Player,
            });
            tally.record(&RoundEvent::GameOver { level: 1 });
            assert_eq!(tally.bot_coins, 1);
            assert_eq!(tally.game_overs, 1);
        }

        #[test]
        fn test_bad_input() {
            assert!(parse(&["--seed"]).is_err());
            assert!(parse(&["--launches", "many"]).is_err());
            assert!(parse(&["--fast"]).is_err());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(e) = native::run() {
        eprintln!("error: {e}");
        std::process::exit(2);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web build is driven by the host page through the library
}
