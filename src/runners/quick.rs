use super::{AlgorithmRunner, trivial_log};
use crate::{EventLog, Recorder};

/// Quicksort with Lomuto partitioning around the last element of each range.
#[derive(Debug, Clone, Copy, Default)]
pub struct Quick;

impl AlgorithmRunner for Quick {
    fn name(&self) -> &'static str {
        "quick"
    }

    fn generate_log(&self, input: &[u32]) -> EventLog {
        if let Some(log) = trivial_log(input) {
            return log;
        }
        let mut a = input.to_vec();
        let mut rec = Recorder::new();

        // Explicit stack, left range on top, so ranges run in recursive pre-order.
        let mut pending = vec![(0, a.len() - 1)];
        while let Some((l, r)) = pending.pop() {
            if l == r {
                rec.mark_sorted(l);
                continue;
            }
            let p = partition(&mut a, &mut rec, l, r);
            if p < r {
                pending.push((p + 1, r));
            }
            if p > l {
                pending.push((l, p - 1));
            }
        }
        rec.finish()
    }
}

fn partition(a: &mut [u32], rec: &mut Recorder, l: usize, r: usize) -> usize {
    let pivot = a[r];
    rec.pivot(r);
    let mut store = l;
    for j in l..r {
        rec.compare(j, r);
        if a[j] < pivot {
            if store != j {
                a.swap(store, j);
                rec.swap(store, j);
            }
            store += 1;
        }
    }
    if store != r {
        a.swap(store, r);
        rec.swap(store, r);
    }
    rec.mark_sorted(store);
    store
}
