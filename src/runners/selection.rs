use super::{AlgorithmRunner, trivial_log};
use crate::{EventLog, Recorder};

/// Selection sort. Each scanned element is compared against the slot being filled.
#[derive(Debug, Clone, Copy, Default)]
pub struct Selection;

impl AlgorithmRunner for Selection {
    fn name(&self) -> &'static str {
        "selection"
    }

    fn generate_log(&self, input: &[u32]) -> EventLog {
        if let Some(log) = trivial_log(input) {
            return log;
        }
        let mut a = input.to_vec();
        let n = a.len();
        let mut rec = Recorder::new();

        for i in 0..n {
            let mut min = i;
            for j in i + 1..n {
                // Highlights the slot being filled, not the running minimum.
                rec.compare(i, j);
                // Strict: an equal value never displaces the first minimum found.
                if a[j] < a[min] {
                    min = j;
                }
            }
            if min != i {
                a.swap(i, min);
                rec.swap(i, min);
            }
            rec.mark_sorted(i);
        }
        rec.finish()
    }
}
