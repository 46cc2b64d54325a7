// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Returns the smallest positive id not present in `existing`.
///
/// Ids freed by deletion are reused: for `[1, 2, 4]` this returns 3, and for
/// `[1, 2, 3]` it returns 4.
#[must_use]
pub fn first_unused_id(existing: &[i64]) -> i64 {
    let mut ids: Vec<i64> = existing.iter().copied().filter(|id| *id > 0).collect();
    ids.sort_unstable();
    ids.dedup();

    let mut candidate: i64 = 1;
    for id in ids {
        if id != candidate {
            break;
        }
        candidate += 1;
    }
    candidate
}
