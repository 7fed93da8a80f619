use super::{AlgorithmRunner, trivial_log};
use crate::{EventLog, Recorder};

/// Top-down merge sort. Ties prefer the left half.
#[derive(Debug, Clone, Copy, Default)]
pub struct Merge;

impl AlgorithmRunner for Merge {
    fn name(&self) -> &'static str {
        "merge"
    }

    fn generate_log(&self, input: &[u32]) -> EventLog {
        if let Some(log) = trivial_log(input) {
            return log;
        }
        let mut a = input.to_vec();
        let mut rec = Recorder::new();
        let last = a.len() - 1;
        sort(&mut a, &mut rec, 0, last);
        rec.finish()
    }
}

fn sort(a: &mut [u32], rec: &mut Recorder, l: usize, r: usize) {
    if l >= r {
        return;
    }
    let m = l + (r - l) / 2;
    sort(a, rec, l, m);
    sort(a, rec, m + 1, r);
    merge(a, rec, l, m, r);
    rec.mark_range_sorted(l, r);
}

fn merge(a: &mut [u32], rec: &mut Recorder, l: usize, m: usize, r: usize) {
    let left = a[l..=m].to_vec();
    let right = a[m + 1..=r].to_vec();
    let (mut i, mut j, mut k) = (0, 0, l);

    while i < left.len() && j < right.len() {
        rec.compare(l + i, m + 1 + j);
        let value = if left[i] <= right[j] {
            i += 1;
            left[i - 1]
        } else {
            j += 1;
            right[j - 1]
        };
        a[k] = value;
        rec.write(k, value);
        k += 1;
    }
    for &value in left[i..].iter().chain(&right[j..]) {
        a[k] = value;
        rec.write(k, value);
        k += 1;
    }
}
