//! Window extraction integration tests.

use loopreel::{FrameSelection, WindowOrder, extract_window, mirror, validate};

fn frames(length: u32) -> Vec<u32> {
    (1..=length).collect()
}

const FORWARD: WindowOrder = WindowOrder {
    reverse: false,
    mirror: false,
};

#[test]
fn forward_window_is_the_selected_slice() {
    let window = extract_window(&frames(20), FrameSelection::new(5, 10), FORWARD);
    assert_eq!(window, (5..=14).collect::<Vec<_>>());
}

#[test]
fn reverse_applies_to_the_window_only() {
    let order = WindowOrder {
        reverse: true,
        mirror: false,
    };
    let window = extract_window(&frames(20), FrameSelection::new(5, 4), order);
    assert_eq!(window, vec![8, 7, 6, 5]);
}

#[test]
fn mirrored_window_loops_without_repeating_ends() {
    let order = WindowOrder {
        reverse: false,
        mirror: true,
    };
    let selection = validate(20, Some(5), Some(10)).unwrap();
    let window = extract_window(&frames(20), selection, order);

    assert_eq!(window.len(), 18);
    assert_eq!(window.first(), Some(&5));
    assert_eq!(window[9], 14);
    // The last frame is the second of the window, so playback wraps to the first.
    assert_eq!(window.last(), Some(&6));
}

#[test]
fn reverse_then_mirror() {
    let order = WindowOrder {
        reverse: true,
        mirror: true,
    };
    let window = extract_window(&frames(6), FrameSelection::new(2, 4), order);
    assert_eq!(window, vec![5, 4, 3, 2, 3, 4]);
}

#[test]
fn mirror_law_holds_for_every_length() {
    for n in 3..=16 {
        let window = frames(n);
        let mirrored = mirror(&window);
        assert_eq!(mirrored.len() as u32, 2 * n - 2);
        assert_eq!(mirrored[..n as usize], window[..]);
        assert_eq!(mirrored.last(), Some(&window[1]));
        for (offset, frame) in mirrored[n as usize..].iter().enumerate() {
            assert_eq!(*frame, window[n as usize - 2 - offset]);
        }
    }
}

#[test]
fn mirroring_a_pair_adds_nothing() {
    let order = WindowOrder {
        reverse: false,
        mirror: true,
    };
    let window = extract_window(&frames(10), FrameSelection::new(9, 2), order);
    assert_eq!(window, vec![9, 10]);
}

#[test]
fn extraction_is_repeatable() {
    let order = WindowOrder {
        reverse: true,
        mirror: true,
    };
    let all = frames(30);
    let selection = FrameSelection::new(7, 12);
    assert_eq!(
        extract_window(&all, selection, order),
        extract_window(&all, selection, order)
    );
}

#[test]
fn validated_selection_yields_exactly_count_frames() {
    for length in 2..=15 {
        let all = frames(length);
        for count in 2..=length {
            for start in 1..=(length - count + 1) {
                let selection = validate(length, Some(start), Some(count)).unwrap();
                let window = extract_window(&all, selection, FORWARD);
                assert_eq!(window.len() as u32, count);
                assert_eq!(window[0], start);
            }
        }
    }
}

#[test]
fn out_of_range_selection_is_clamped() {
    let window = extract_window(&frames(5), FrameSelection::new(4, 10), FORWARD);
    assert_eq!(window, vec![4, 5]);
    assert!(extract_window(&frames(5), FrameSelection::new(9, 2), FORWARD).is_empty());
}

#[test]
fn reversed_mirror_of_a_twenty_frame_set() {
    let order = WindowOrder {
        reverse: true,
        mirror: true,
    };
    let selection = validate(20, Some(5), Some(10)).unwrap();
    let window = extract_window(&frames(20), selection, order);

    let expected: Vec<u32> = (5..=14).rev().chain(6..=13).collect();
    assert_eq!(window, expected);
    assert_eq!(window.len(), 18);
}
