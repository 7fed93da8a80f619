use super::{AlgorithmRunner, trivial_log};
use crate::{EventLog, Recorder};

/// Bubble sort with the early exit on a swap-free pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bubble;

impl AlgorithmRunner for Bubble {
    fn name(&self) -> &'static str {
        "bubble"
    }

    fn generate_log(&self, input: &[u32]) -> EventLog {
        if let Some(log) = trivial_log(input) {
            return log;
        }
        let mut a = input.to_vec();
        let n = a.len();
        let mut rec = Recorder::new();
        let mut exited_early = false;

        for pass in 0..n - 1 {
            let mut swapped = false;
            for j in 0..n - 1 - pass {
                rec.compare(j, j + 1);
                if a[j] > a[j + 1] {
                    a.swap(j, j + 1);
                    rec.swap(j, j + 1);
                    swapped = true;
                }
            }
            rec.mark_sorted(n - 1 - pass);
            if !swapped {
                rec.mark_range_sorted(0, n - 2 - pass);
                exited_early = true;
                break;
            }
        }
        // The last full pass fixes position 1; position 0 follows.
        if !exited_early {
            rec.mark_sorted(0);
        }
        rec.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Event;

    #[test]
    fn sorted_input_exits_after_one_pass() {
        let log = Bubble.generate_log(&[1, 2, 3, 4]);
        assert_eq!(
            log.events(),
            &[
                Event::Compare { i: 0, j: 1 },
                Event::Compare { i: 1, j: 2 },
                Event::Compare { i: 2, j: 3 },
                Event::MarkSorted { i: 3 },
                Event::MarkRangeSorted { l: 0, r: 2 },
                Event::Done,
            ]
        );
    }

    #[test]
    fn reversed_input_runs_every_pass() {
        let log = Bubble.generate_log(&[3, 2, 1]);
        assert_eq!(
            log.events(),
            &[
                Event::Compare { i: 0, j: 1 },
                Event::Swap { i: 0, j: 1 },
                Event::Compare { i: 1, j: 2 },
                Event::Swap { i: 1, j: 2 },
                Event::MarkSorted { i: 2 },
                Event::Compare { i: 0, j: 1 },
                Event::Swap { i: 0, j: 1 },
                Event::MarkSorted { i: 1 },
                Event::MarkSorted { i: 0 },
                Event::Done,
            ]
        );
    }

    #[test]
    fn early_exit_covers_remaining_prefix() {
        // One swap in pass 0, then pass 1 is clean.
        let log = Bubble.generate_log(&[1, 3, 2, 4]);
        let tail: Vec<_> = log.events().iter().rev().take(3).rev().copied().collect();
        assert_eq!(
            tail,
            vec![
                Event::MarkSorted { i: 2 },
                Event::MarkRangeSorted { l: 0, r: 1 },
                Event::Done,
            ]
        );
    }
}
