/// Builds a [`LazyVal`](crate::LazyVal) from an inline block.
///
/// The block becomes the body of a `move` closure, so every variable it
/// mentions is captured by value at the point of construction.
///
/// # Example
///
/// ```rust
/// use lazy_val::lazy;
///
/// let mut number = 6;
/// let val = lazy! {
///     println!("Calculating the answer...");
///     println!("while the number is {number}");
///     42
/// };
///
/// number = 2;
/// assert_eq!(number, 2);
/// assert_eq!(*val, 42);
/// ```
#[macro_export]
macro_rules! lazy {
    ($($body:tt)*) => {
        $crate::LazyVal::new(move || { $($body)* })
    };
}
