use std::cell::RefCell;

use tick_flow::{fire_handlers, try_fire_handlers, FireError, Tick};

#[test]
fn test_handler_count_mismatch_is_rejected() {
    let mut noop = |_: usize| {};
    let mut handlers: Vec<&mut dyn FnMut(usize)> = vec![&mut noop];

    let result = try_fire_handlers(0, &[5, 12], &mut handlers);

    assert_eq!(
        result,
        Err(FireError::HandlerCountMismatch {
            timing_ticks: 2,
            handlers: 1,
        })
    );
}

#[test]
fn test_mismatch_fires_nothing() {
    let mut count = 0;
    let mut counting = |_: usize| count += 1;
    {
        let mut handlers: Vec<&mut dyn FnMut(usize)> = vec![&mut counting];
        let _ = try_fire_handlers(5, &[5, 12], &mut handlers);
    }
    assert_eq!(count, 0);
}

#[test]
fn test_mismatch_error_message_names_both_counts() {
    let error = FireError::HandlerCountMismatch {
        timing_ticks: 3,
        handlers: 1,
    };
    assert_eq!(
        error.to_string(),
        "Handler count 1 does not match timing tick count 3"
    );
}

#[test]
fn test_matching_counts_dispatch_by_index() {
    let fired: RefCell<Vec<(&str, usize)>> = RefCell::new(Vec::new());
    let mut first = |index: usize| fired.borrow_mut().push(("first", index));
    let mut second = |index: usize| fired.borrow_mut().push(("second", index));
    let timing_ticks: [Tick; 2] = [12, 12];

    {
        let mut handlers: Vec<&mut dyn FnMut(usize)> = vec![&mut first, &mut second];
        try_fire_handlers(12, &timing_ticks, &mut handlers).unwrap();
    }

    assert_eq!(fired.into_inner(), vec![("first", 0), ("second", 1)]);
}

#[test]
fn test_empty_slices_are_valid() {
    let mut handlers: Vec<&mut dyn FnMut(usize)> = Vec::new();
    assert!(try_fire_handlers(0, &[], &mut handlers).is_ok());
}

#[test]
#[should_panic(expected = "handler count must match timing tick count")]
fn test_panicking_wrapper_panics_on_mismatch() {
    let mut noop = |_: usize| {};
    let mut handlers: Vec<&mut dyn FnMut(usize)> = vec![&mut noop];
    fire_handlers(0, &[5, 12], &mut handlers);
}
