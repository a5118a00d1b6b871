use derive_new::new;
use std::collections::HashSet;
use std::hash::Hash;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit<T> {
    Delete { value: T },
    Insert { value: T },
    Equal { value: T },
}

impl<T> Edit<T> {
    pub fn value(&self) -> &T {
        match self {
            Edit::Delete { value } | Edit::Insert { value } | Edit::Equal { value } => value,
        }
    }
}

pub trait DiffAlgorithm<T> {
    /// The edit script turning the first sequence into the second.
    fn diff(&self) -> Vec<Edit<T>>;
}

/// Myers' shortest edit script between two token sequences, in linear space.
///
/// `a` is the baseline side and `b` the result side, so `Delete` marks a token
/// only the baseline has and `Insert` one only the result has.
///
/// Instead of keeping one frontier per edit distance, the search runs from
/// both ends at once until the two frontiers overlap, splits the problem at
/// the meeting point and recurses on both halves. Memory stays proportional
/// to `a.len() + b.len()` whatever the distance.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct MyersDiff<'d, T> {
    a: &'d [T],
    b: &'d [T],
}

impl<T: Eq + Hash + Clone> DiffAlgorithm<T> for MyersDiff<'_, T> {
    fn diff(&self) -> Vec<Edit<T>> {
        let mut script = Vec::with_capacity(self.a.len().max(self.b.len()));

        // fully rewritten input, the common golden-file worst case
        if share_no_token(self.a, self.b) {
            replace(self.a, self.b, &mut script);
        } else {
            diff_range(self.a, self.b, &mut script);
        }

        script
    }
}

fn share_no_token<T: Eq + Hash>(a: &[T], b: &[T]) -> bool {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let tokens = short.iter().collect::<HashSet<_>>();

    !long.iter().any(|token| tokens.contains(token))
}

fn replace<T: Clone>(a: &[T], b: &[T], script: &mut Vec<Edit<T>>) {
    script.extend(a.iter().map(|value| Edit::Delete {
        value: value.clone(),
    }));
    script.extend(b.iter().map(|value| Edit::Insert {
        value: value.clone(),
    }));
}

fn equal<T: Clone>(tokens: &[T], script: &mut Vec<Edit<T>>) {
    script.extend(tokens.iter().map(|value| Edit::Equal {
        value: value.clone(),
    }));
}

fn diff_range<T: Eq + Clone>(a: &[T], b: &[T], script: &mut Vec<Edit<T>>) {
    let prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    let suffix = a[prefix..]
        .iter()
        .rev()
        .zip(b[prefix..].iter().rev())
        .take_while(|(x, y)| x == y)
        .count();
    let a_mid = &a[prefix..a.len() - suffix];
    let b_mid = &b[prefix..b.len() - suffix];

    equal(&a[..prefix], script);

    if a_mid.is_empty() || b_mid.is_empty() {
        replace(a_mid, b_mid, script);
    } else {
        match split_point(a_mid, b_mid) {
            // both halves are strictly smaller problems
            Some((x, y)) if (x, y) != (0, 0) && (x, y) != (a_mid.len(), b_mid.len()) => {
                diff_range(&a_mid[..x], &b_mid[..y], script);
                diff_range(&a_mid[x..], &b_mid[y..], script);
            }
            _ => replace(a_mid, b_mid, script),
        }
    }

    equal(&a[a.len() - suffix..], script);
}

/// Where a shortest path from `(0, 0)` to `(n, m)` can be cut in two.
///
/// `forward[k]` is the furthest `x` reached on diagonal `k = x - y` from the
/// top-left corner; `backward[k]` the same measured from the bottom-right
/// corner on the reversed inputs. Diagonals that leave the grid stop being
/// extended. Expects trimmed, non-empty inputs.
fn split_point<T: Eq>(a: &[T], b: &[T]) -> Option<(usize, usize)> {
    let (n, m) = (a.len() as isize, b.len() as isize);
    let max_d = (n + m + 1) / 2;
    let offset = max_d;
    let width = 2 * max_d;
    let delta = n - m;
    // with an odd delta the forward pass closes the gap, otherwise the backward one
    let forward_meets = delta % 2 != 0;

    let mut forward = vec![-1isize; width as usize];
    let mut backward = vec![-1isize; width as usize];
    forward[(offset + 1) as usize] = 0;
    backward[(offset + 1) as usize] = 0;

    let (mut forward_start, mut forward_end) = (0, 0);
    let (mut backward_start, mut backward_end) = (0, 0);

    for d in 0..max_d {
        let mut k = -d + forward_start;
        while k <= d - forward_end {
            let idx = (offset + k) as usize;
            let mut x = if k == -d || (k != d && forward[idx - 1] < forward[idx + 1]) {
                forward[idx + 1]
            } else {
                forward[idx - 1] + 1
            };
            let mut y = x - k;
            while x < n && y < m && a[x as usize] == b[y as usize] {
                x += 1;
                y += 1;
            }
            forward[idx] = x;

            if x > n {
                forward_end += 2;
            } else if y > m {
                forward_start += 2;
            } else if forward_meets {
                let other = offset + delta - k;
                if (0..width).contains(&other) && backward[other as usize] != -1 {
                    let reached = n - backward[other as usize];
                    if x >= reached {
                        return Some((x as usize, y as usize));
                    }
                }
            }
            k += 2;
        }

        let mut k = -d + backward_start;
        while k <= d - backward_end {
            let idx = (offset + k) as usize;
            let mut x = if k == -d || (k != d && backward[idx - 1] < backward[idx + 1]) {
                backward[idx + 1]
            } else {
                backward[idx - 1] + 1
            };
            let mut y = x - k;
            while x < n && y < m && a[(n - x - 1) as usize] == b[(m - y - 1) as usize] {
                x += 1;
                y += 1;
            }
            backward[idx] = x;

            if x > n {
                backward_end += 2;
            } else if y > m {
                backward_start += 2;
            } else if !forward_meets {
                let other = offset + delta - k;
                if (0..width).contains(&other) && forward[other as usize] != -1 {
                    let forward_x = forward[other as usize];
                    let forward_y = forward_x - (other - offset);
                    if forward_y >= 0 && forward_x >= n - x {
                        return Some((forward_x as usize, forward_y as usize));
                    }
                }
            }
            k += 2;
        }
    }

    None
}
