//! Equity calculation entry points.
//!
//! Flow: validate (synchronously, before any trial) → run `sample_size`
//! independent trials, in parallel with the `parallel` feature → merge the
//! per-worker tallies → normalize.
//!
//! Randomness: the master seed is the configured seed or, by default, a hash
//! of the participant list. Trial `i` draws from its own `SmallRng` seeded
//! with `splitmix64(master + i * γ)`, so no generator is shared between
//! threads and results are bit-identical for the same input no matter how
//! trials are spread over workers.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Instant;

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::EquityConfig;
use crate::equity::{Equities, Tally};
use crate::error::EquityError;
use crate::hand::Hand;
use crate::range::Range;
use crate::sampler::{validate_hands, validate_ranges, Sampler};
use crate::simulation::Simulator;

/// Monte Carlo equity of fixed hands against each other.
///
/// Hands must be card-disjoint from each other, the board and the dead cards;
/// otherwise [`EquityError::DuplicateCard`] is returned and nothing runs.
/// A single hand wins every trial.
pub fn calculate_hands(config: &EquityConfig, hands: &[Hand]) -> Result<Equities<Hand>, EquityError> {
    check_card_budget(config, hands.len())?;
    validate_hands(hands, config.blocked())?;
    debug!("validated {} hands", hands.len());

    let seed = master_seed(config, hands);
    let tally = run(config, hands.len(), seed, |_, out| {
        out.clear();
        out.extend_from_slice(hands);
        Ok(())
    })?;
    Ok(tally.finish(hands.to_vec()))
}

/// Monte Carlo equity of ranges against each other. Each trial draws one
/// hand per range so that no two drawn hands, the board or a dead card share
/// a card.
///
/// Structurally impossible inputs are rejected up front with
/// [`EquityError::RangeOverlap`] or [`EquityError::RangeBlocked`]. Inputs
/// that pass the pairwise check but still cannot be dealt jointly fail with
/// [`EquityError::SamplerExhausted`].
pub fn calculate_ranges(config: &EquityConfig, ranges: &[Range]) -> Result<Equities<Range>, EquityError> {
    check_card_budget(config, ranges.len())?;
    let blocked = config.blocked();
    validate_ranges(ranges, blocked)?;
    debug!("validated {} ranges", ranges.len());

    let sampler = Sampler::new(ranges, blocked, config.max_sample_attempts());
    let seed = master_seed(config, ranges);
    let tally = run(config, ranges.len(), seed, |rng, out| sampler.deal(rng, out))?;
    Ok(tally.finish(ranges.to_vec()))
}

/// Two hole cards per participant plus the rest of the board must fit in what
/// the board and dead cards leave over.
fn check_card_budget(config: &EquityConfig, participants: usize) -> Result<(), EquityError> {
    if participants == 0 {
        return Err(EquityError::NoParticipants);
    }
    let needed = 2 * participants + config.board().missing();
    let available = 52 - config.blocked().len();
    if needed > available {
        return Err(EquityError::NotEnoughCards { needed, available });
    }
    Ok(())
}

fn master_seed<P: Hash>(config: &EquityConfig, participants: &[P]) -> u64 {
    config.seed().unwrap_or_else(|| {
        let mut h = DefaultHasher::new();
        participants.hash(&mut h);
        h.finish()
    })
}

#[inline(always)]
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

#[inline(always)]
fn trial_seed(master: u64, trial: u64) -> u64 {
    splitmix64(master.wrapping_add(trial.wrapping_mul(0x9E37_79B9_7F4A_7C15)))
}

/// Per-worker state: simulator buffers, the trial's hands and a private tally.
struct Worker<'a, D> {
    sim: Simulator<'a>,
    hands: Vec<Hand>,
    tally: Tally,
    deal: &'a D,
    seed: u64,
}

impl<'a, D> Worker<'a, D>
where
    D: Fn(&mut SmallRng, &mut Vec<Hand>) -> Result<(), EquityError>,
{
    fn new(config: &'a EquityConfig, participants: usize, seed: u64, deal: &'a D) -> Self {
        Self {
            sim: Simulator::new(config),
            hands: Vec::with_capacity(participants),
            tally: Tally::new(participants),
            deal,
            seed,
        }
    }

    fn trial(&mut self, i: u64) -> Result<(), EquityError> {
        let mut rng = SmallRng::seed_from_u64(trial_seed(self.seed, i));
        (self.deal)(&mut rng, &mut self.hands)?;
        let outcomes = self.sim.run(&self.hands, &mut rng)?;
        self.tally.record(outcomes);
        Ok(())
    }
}

fn run<D>(config: &EquityConfig, participants: usize, seed: u64, deal: D) -> Result<Tally, EquityError>
where
    D: Fn(&mut SmallRng, &mut Vec<Hand>) -> Result<(), EquityError> + Sync,
{
    let samples = config.sample_size();
    info!(
        "running {} trials for {} participants (seed {:#018x})",
        samples, participants, seed
    );
    let start = Instant::now();
    let tally = run_trials(config, participants, seed, &deal)?;
    debug_assert_eq!(tally.trials(), samples as u64);
    info!("finished {} trials in {:.2?}", tally.trials(), start.elapsed());
    Ok(tally)
}

#[cfg(not(feature = "parallel"))]
fn run_trials<D>(config: &EquityConfig, participants: usize, seed: u64, deal: &D) -> Result<Tally, EquityError>
where
    D: Fn(&mut SmallRng, &mut Vec<Hand>) -> Result<(), EquityError> + Sync,
{
    let mut worker = Worker::new(config, participants, seed, deal);
    for i in 0..config.sample_size() as u64 {
        worker.trial(i)?;
    }
    Ok(worker.tally)
}

#[cfg(feature = "parallel")]
fn run_trials<D>(config: &EquityConfig, participants: usize, seed: u64, deal: &D) -> Result<Tally, EquityError>
where
    D: Fn(&mut SmallRng, &mut Vec<Hand>) -> Result<(), EquityError> + Sync,
{
    use rayon::prelude::*;

    let go = || {
        (0..config.sample_size() as u64)
            .into_par_iter()
            .try_fold(
                || Worker::new(config, participants, seed, deal),
                |mut w, i| w.trial(i).map(|_| w),
            )
            .map(|w| w.map(|w| w.tally))
            .try_reduce(|| Tally::new(participants), |a, b| Ok(a.merge(b)))
    };

    match config.workers() {
        Some(n) => {
            debug!("using a dedicated pool of {n} workers");
            let pool = rayon::ThreadPoolBuilder::new().num_threads(n).build()?;
            pool.install(go)
        }
        None => go(),
    }
}
