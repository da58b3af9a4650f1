use std::cmp::Ordering;

// Fat partition (Dutch national flag partition), no Clone required.
// Returns (l, r) where arr[0..l] < pivot, arr[l..r] == pivot, and arr[r..] > pivot
// (l is not in the left region but r is in the right region).
// The left region or right region could be empty, but the equal region
// cannot be empty, as the pivot is selected from the array itself.
pub fn fat_partition_no_clone_required<Element, Comparator>(
    arr: &mut [Element],
    comparator: &Comparator,
    initial_pivot_index: usize,
) -> (usize, usize)
    where
        Comparator: Fn(&Element, &Element) -> Ordering
{
    let len = arr.len();
    assert!(len > 2);

    let mut curr_pivot_index = initial_pivot_index;

    let mut left_index = 0;
    let mut right_index = len - 1;
    let mut eq_index = 0;

    while eq_index <= right_index {
        if curr_pivot_index == eq_index {
            eq_index += 1;
            continue;
        }

        match comparator(&arr[eq_index], &arr[curr_pivot_index]) {
            Ordering::Less => {
                if left_index == eq_index {
                    left_index += 1;
                    eq_index += 1;
                } else {
                    arr.swap(eq_index, left_index);

                    if left_index == curr_pivot_index {
                        curr_pivot_index = eq_index;
                    }

                    left_index += 1;
                    eq_index += 1;
                }
            }
            Ordering::Equal => {
                eq_index += 1;
            }
            Ordering::Greater => {
                arr.swap(eq_index, right_index);

                if right_index == curr_pivot_index {
                    curr_pivot_index = eq_index;
                }

                right_index -= 1;
            }
        }
    }

    assert_eq!(eq_index, right_index + 1);

    (left_index, eq_index)
}
