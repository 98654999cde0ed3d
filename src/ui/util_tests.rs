#![allow(clippy::unwrap_used)]

use super::util::*;
use rust_decimal_macros::dec;

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(0)), "$0.00");
    assert_eq!(format_amount(dec!(4.5)), "$4.50");
    assert_eq!(format_amount(dec!(1234.56)), "$1,234.56");
    assert_eq!(format_amount(dec!(1234567.89)), "$1,234,567.89");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-42)), "-$42.00");
    assert_eq!(format_amount(dec!(-1000)), "-$1,000.00");
}

#[test]
fn test_format_signed() {
    assert_eq!(format_signed(dec!(100)), "+$100.00");
    assert_eq!(format_signed(dec!(-40)), "-$40.00");
    assert_eq!(format_signed(dec!(0)), "+$0.00");
}

#[test]
fn test_format_date_utc() {
    // 2024-01-01T00:00:00Z
    assert_eq!(format_date(1_704_067_200_000), "01.01.2024");
    // 2024-09-15T12:00:00Z
    assert_eq!(format_date(1_726_401_600_000), "15.09.2024");
}

#[test]
fn test_truncate_short_string_unchanged() {
    assert_eq!(truncate("hello", 10), "hello");
    assert_eq!(truncate("hello", 5), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 8), "hello w…");
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_multibyte() {
    assert_eq!(truncate("🎯🎯🎯🎯", 3), "🎯🎯…");
}

#[test]
fn test_scroll_down_and_up() {
    let (mut index, mut scroll) = (0usize, 0usize);
    scroll_down(&mut index, &mut scroll, 10, 5);
    assert_eq!((index, scroll), (1, 0));

    for _ in 0..8 {
        scroll_down(&mut index, &mut scroll, 10, 5);
    }
    assert_eq!(index, 9);
    assert_eq!(scroll, 5);

    // Already at the end
    scroll_down(&mut index, &mut scroll, 10, 5);
    assert_eq!(index, 9);

    scroll_up(&mut index, &mut scroll);
    assert_eq!(index, 8);
}

#[test]
fn test_scroll_to_top_and_bottom() {
    let (mut index, mut scroll) = (7usize, 4usize);
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));

    scroll_to_bottom(&mut index, &mut scroll, 10, 5);
    assert_eq!((index, scroll), (9, 5));

    // Empty list is a no-op
    let (mut index, mut scroll) = (0usize, 0usize);
    scroll_to_bottom(&mut index, &mut scroll, 0, 5);
    assert_eq!((index, scroll), (0, 0));
}
