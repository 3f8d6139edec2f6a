/// a macro to get the first Some value from a list of Options with an optional default
/// ```
/// # fn main() {
/// # use edgefn::option;
/// // if you don't specify a default value, the return value will be wrapped in an Option
/// let value = option!(
///   None,
///   Some(10),
///   Some(20),
/// );
///
/// assert_eq!(value, Some(10));
///
/// // if you specify a default value, the return value will not be wrapped in an Option
/// let value2: u8 = option!(
///   None,
///   None
///   => 1
/// );
///
/// assert_eq!(value2, 1);
/// # }
/// ```
#[macro_export]
macro_rules! option {

  // only one item
  ($head:expr $(,)?) => {
    $head
  };

  // two or more items, recursive
  ($head:expr, $($tail:expr),* $(,)?) => {
    match $head {
      Some(v) => Some(v),
      None => $crate::option!($($tail),*),
    }
  };

  // one item with upfront default
  ($head:expr $(,)? => $default:expr) => {
    $crate::option!($head).unwrap_or($default)
  };

  // two or more items with upfront default
  ($head:expr, $($tail:expr),* $(,)? => $default:expr) => {
    $crate::option!($head, $($tail),*).unwrap_or($default)
  };
}
