/// Asserts that two scores are equal up to a small tolerance.
///
/// The tolerance defaults to `0.0005`.
#[macro_export]
macro_rules! assert_nearly_equals {
    ($left:expr, $right:expr) => {{
        $crate::assert_nearly_equals!($left, $right, 0.0005);
    }};
    ($left:expr, $right:expr, $epsilon:expr) => {{
        match (&$left, &$right, &$epsilon) {
            (left_val, right_val, epsilon_val) => {
                let diff = (left_val - right_val).abs();
                if diff > *epsilon_val {
                    panic!(
                        r#"assertion failed: `abs(left-right)>epsilon`
    left: `{:?}`,
    right: `{:?}`,
    epsilon: `{:?}`"#,
                        &*left_val, &*right_val, &*epsilon_val
                    )
                }
            }
        }
    }};
}
