//! Balance simulator for Button Game.
//! Run with: cargo test simulate_milestones -- --nocapture

#[cfg(test)]
mod tests {
    use crate::game::config::ProgressConfig;
    use crate::game::logic;
    use crate::game::state::ProgressState;

    /// Clicks a fresh run needs to reach `level`.
    fn clicks_to_reach(level: u32) -> u64 {
        if level <= 1 {
            0
        } else {
            logic::level_threshold(level - 1)
        }
    }

    fn format_duration(clicks: u64, clicks_per_sec: f64) -> String {
        let secs = clicks as f64 / clicks_per_sec;
        if secs < 60.0 {
            format!("{secs:.0}s")
        } else if secs < 3600.0 {
            format!("{:.1}m", secs / 60.0)
        } else if secs < 86400.0 {
            format!("{:.1}h", secs / 3600.0)
        } else {
            format!("{:.1}d", secs / 86400.0)
        }
    }

    /// Click one at a time and record the click count at each level-up.
    fn simulate(config: &ProgressConfig, max_level: u32) -> Vec<(u32, u64)> {
        let mut state = ProgressState::new(config.default_rank());
        let mut reached = vec![(1, 0)];
        while state.level < max_level {
            let outcome = logic::apply_click(&mut state, config);
            if outcome.leveled_up {
                reached.push((state.level, state.score));
            }
        }
        reached
    }

    #[test]
    fn simulated_run_matches_thresholds() {
        let config = ProgressConfig::builtin().unwrap();
        for (level, clicks) in simulate(&config, 20) {
            assert_eq!(clicks, clicks_to_reach(level), "level {level}");
        }
    }

    #[test]
    fn simulate_milestones() {
        let config = ProgressConfig::builtin().unwrap();
        // a steady clicker; bursts run faster but nobody sustains them
        let cps = 5.0;

        println!();
        println!("=== Button Game milestones ({cps} clicks/s) ===");
        println!("{:<28} {:>6} {:>22} {:>8}", "milestone", "level", "clicks", "time");

        let mut milestones: Vec<(u32, String)> = config
            .ranks
            .iter()
            .map(|r| (r.level, format!("rank {}", r.title)))
            .chain(
                config
                    .rewards
                    .iter()
                    .map(|r| (r.level, format!("{} {}", r.icon, r.title))),
            )
            .collect();
        milestones.sort_by_key(|(level, _)| *level);

        for (level, name) in &milestones {
            let clicks = clicks_to_reach(*level);
            println!(
                "{:<28} {:>6} {:>22} {:>8}",
                name,
                level,
                clicks,
                format_duration(clicks, cps)
            );
        }

        // The early game must be quick: first reward and second rank inside a minute.
        let first_reward = config.rewards[0].level;
        assert!(clicks_to_reach(first_reward) as f64 / cps < 60.0);
        assert!(clicks_to_reach(config.ranks[1].level) as f64 / cps < 60.0);

        // Later milestones keep getting further apart.
        let gaps: Vec<u64> = milestones
            .windows(2)
            .filter(|w| w[0].0 != w[1].0)
            .map(|w| clicks_to_reach(w[1].0) - clicks_to_reach(w[0].0))
            .collect();
        assert!(gaps.windows(2).all(|g| g[1] >= g[0]), "gaps: {gaps:?}");

        // The simulated run agrees with the closed form where it is cheap to check.
        let simulated = simulate(&config, 10);
        assert_eq!(simulated.last(), Some(&(10, clicks_to_reach(10))));
    }
}
