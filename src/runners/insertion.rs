use super::{AlgorithmRunner, trivial_log};
use crate::{EventLog, Recorder};

/// Insertion sort with shifting writes.
///
/// After each key is placed the whole processed prefix `0..=i` is reported sorted.
/// That is a display convention: the prefix is ordered but not yet in its final
/// global position until `Done`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Insertion;

impl AlgorithmRunner for Insertion {
    fn name(&self) -> &'static str {
        "insertion"
    }

    fn generate_log(&self, input: &[u32]) -> EventLog {
        if let Some(log) = trivial_log(input) {
            return log;
        }
        let mut a = input.to_vec();
        let n = a.len();
        let mut rec = Recorder::new();

        rec.mark_sorted(0);
        for i in 1..n {
            let key = a[i];
            // `slot` is where the key would land; the candidate is `slot - 1`.
            let mut slot = i;
            while slot > 0 {
                rec.compare(slot - 1, i);
                if a[slot - 1] > key {
                    a[slot] = a[slot - 1];
                    rec.write(slot, a[slot - 1]);
                    slot -= 1;
                } else {
                    break;
                }
            }
            a[slot] = key;
            rec.write(slot, key);
            rec.mark_range_sorted(0, i);
        }
        rec.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Event;

    #[test]
    fn shifts_with_writes_not_swaps() {
        let log = Insertion.generate_log(&[3, 1, 2]);
        assert_eq!(
            log.events(),
            &[
                Event::MarkSorted { i: 0 },
                Event::Compare { i: 0, j: 1 },
                Event::Write { i: 1, value: 3 },
                Event::Write { i: 0, value: 1 },
                Event::MarkRangeSorted { l: 0, r: 1 },
                Event::Compare { i: 1, j: 2 },
                Event::Write { i: 2, value: 3 },
                Event::Compare { i: 0, j: 2 },
                Event::Write { i: 1, value: 2 },
                Event::MarkRangeSorted { l: 0, r: 2 },
                Event::Done,
            ]
        );
        assert_eq!(log.count("swap"), 0);
    }

    #[test]
    fn stops_scan_at_first_not_greater_element() {
        let log = Insertion.generate_log(&[1, 2, 2]);
        // Each key compares once and writes itself back in place.
        assert_eq!(log.count("compare"), 2);
        assert_eq!(log.count("write"), 2);
    }
}
