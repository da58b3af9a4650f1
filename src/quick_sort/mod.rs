pub mod partition;
pub mod pivot_select;
pub mod simple_quick_sort;
