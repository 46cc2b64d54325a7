// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::first_unused_id;

#[test]
fn test_first_id_is_one() {
    assert_eq!(first_unused_id(&[]), 1);
}

#[test]
fn test_contiguous_ids_allocate_next() {
    assert_eq!(first_unused_id(&[1, 2, 3]), 4);
}

#[test]
fn test_first_gap_is_reused() {
    assert_eq!(first_unused_id(&[1, 2, 4, 5]), 3);
    assert_eq!(first_unused_id(&[2, 3]), 1);
}

#[test]
fn test_unsorted_input_is_handled() {
    assert_eq!(first_unused_id(&[3, 1, 5, 2]), 4);
}

#[test]
fn test_non_positive_and_duplicate_ids_are_ignored() {
    assert_eq!(first_unused_id(&[0, -4, 1, 1, 2]), 3);
}
