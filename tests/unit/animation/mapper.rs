use std::{
    cell::Cell,
    sync::{Arc, Mutex},
};

use super::*;

const DT: f64 = 1.0 / 60.0;

#[test]
fn endpoints_map_to_first_and_last_frame() {
    assert_eq!(frame_index_for(0.0, 40), FrameIndex(1));
    assert_eq!(frame_index_for(1.0, 40), FrameIndex(40));
    assert_eq!(frame_index_for(-3.0, 40), FrameIndex(1));
    assert_eq!(frame_index_for(7.0, 40), FrameIndex(40));
    assert_eq!(frame_index_for(0.5, 1), FrameIndex(1));
}

#[test]
fn position_is_linear_between_ends() {
    assert_eq!(frame_position(0.0, 40), 1.0);
    assert_eq!(frame_position(1.0, 40), 40.0);
    assert_eq!(frame_position(0.5, 41), 21.0);
    assert_eq!(frame_index_for(0.5, 40), FrameIndex(20));
}

#[test]
fn index_is_monotonic_in_progress() {
    let mut prev = FrameIndex(1);
    for i in 0..=1000 {
        let idx = frame_index_for(f64::from(i) / 1000.0, 40);
        assert!(idx >= prev);
        assert!((1..=40).contains(&idx.0));
        prev = idx;
    }
    for i in (0..=1000).rev() {
        let idx = frame_index_for(f64::from(i) / 1000.0, 40);
        assert!(idx <= prev);
        prev = idx;
    }
}

#[test]
fn zero_frames_is_rejected() {
    assert!(FrameMapper::new(0, SpringParams::default(), 0.0).is_err());
}

#[test]
fn notifies_only_on_integer_changes() {
    let mut mapper = FrameMapper::new(40, SpringParams::default(), 0.0).unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    mapper.subscribe(move |idx| sink.lock().unwrap().push(idx.0));

    let raw = Cell::new(1.0);
    let source = || raw.get();
    let mut ticks = 0;
    while !mapper.is_settled() && ticks < 1200 {
        mapper.tick(&source, DT);
        ticks += 1;
    }

    let seen = seen.lock().unwrap();
    assert_eq!(mapper.current_index(), FrameIndex(40));
    assert_eq!(seen.last(), Some(&40));
    assert!(seen.windows(2).all(|w| w[0] < w[1]), "no repeats: {seen:?}");
    assert!(seen.len() < ticks, "fewer notifications than ticks");
}

#[test]
fn smoothed_progress_lags_raw_progress() {
    let mut mapper = FrameMapper::new(40, SpringParams::default(), 0.0).unwrap();
    let source = || 1.0;
    mapper.tick(&source, DT);
    assert!(mapper.smoothed_progress() < 0.1);
    assert!(mapper.current_index() < FrameIndex(40));
}

#[test]
fn unsubscribed_listener_stops_firing() {
    let mut mapper = FrameMapper::new(10, SpringParams::default(), 0.0).unwrap();
    let hits = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&hits);
    let id = mapper.subscribe(move |_| *sink.lock().unwrap() += 1);

    assert_eq!(mapper.jump_to(1.0), Some(FrameIndex(10)));
    assert!(mapper.unsubscribe(id));
    assert!(!mapper.unsubscribe(id));
    assert_eq!(mapper.jump_to(0.0), Some(FrameIndex(1)));
    assert_eq!(*hits.lock().unwrap(), 1);
}

#[test]
fn sub_frame_jump_reports_no_change() {
    let mut mapper = FrameMapper::new(40, SpringParams::default(), 0.0).unwrap();
    assert_eq!(mapper.jump_to(0.001), None);
    assert_eq!(mapper.current_index(), FrameIndex(1));
}
