//! Clock-radio firmware core.
//!
//! Everything that does not touch a register lives here so it can be
//! tested on the host: input decoding, the event mailbox, the navigation
//! state machine with its screens, alarm/settings records and the status
//! monitor. Hardware is reached only through the traits in [`devices`].
//!
//! Usage: `cargo test` (host) or
//! `cargo run --release --features embedded --target thumbv7em-none-eabihf`.
//!
//! Note: the embedded binary (`main.rs`) wires the nRF52840 drivers in
//! `board/` to this library.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod alarms;
pub mod clock;
pub mod config;
pub mod context;
pub mod devices;
pub mod error;
pub mod input;
pub mod mailbox;
pub mod orchestrator;
pub mod router;
pub mod settings;
pub mod status;
pub mod store;
pub mod ui;

pub use error::Error;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

    use super::alarms::{self, AlarmTime};
    use super::clock::{self, DateTimeField};
    use super::context::{keys, truncated, Context};
    use super::error::Error;
    use super::input::quadrature::step_direction;
    use super::input::{
        AuxButton, Debounce, DebouncedSwitch, Direction, Encoder, EncoderHub, InputEvent, Levels,
        QuadratureDecoder, SwitchEdge, Trigger,
    };
    use super::mailbox::{AuxEvent, AuxiliaryQueue, EventMailbox, Fifo, Report, ReportSink};
    use super::settings::{self, TimeMode, TIMEZONES};
    use super::status::{battery_label, radio_text, report_text};
    use super::store::{MemoryStore, RecordKey, RecordStore};
    use super::ui::list_menu::cursor_for;
    use super::ui::{menus, EditorField, ListMenu, MenuItem};

    type Mx = CriticalSectionRawMutex;

    const CW: [u8; 4] = [1, 3, 2, 0];
    const CCW: [u8; 4] = [2, 3, 1, 0];

    /// Run `states` through the debounce path, `gap_ms` apart.
    fn feed(decoder: &mut QuadratureDecoder, states: &[u8], start_ms: u64, gap_ms: u64) -> u64 {
        let mut now = start_ms;
        for &s in states {
            let epoch = match decoder.on_channel_edge_interrupt() {
                Debounce::Arm { epoch, .. } => epoch,
                Debounce::Ignore => panic!("edge ignored"),
            };
            decoder.on_timer_fire(s & 0b10 != 0, s & 0b01 != 0, epoch, now);
            now += gap_ms;
        }
        now
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 7, 4)
            .and_then(|d| d.and_hms_opt(h, m, s))
            .unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════
    // DebouncedSwitch
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn switch_two_edges_in_window_give_one_callback() {
        let mut sw = DebouncedSwitch::new(24, true, 10, Trigger::OnPress);
        assert_eq!(sw.on_edge_interrupt(), Debounce::Arm { delay_ms: 10, epoch: 0 });
        assert_eq!(sw.on_edge_interrupt(), Debounce::Ignore);
        assert!(sw.is_pending());

        assert_eq!(sw.on_timer_fire(false, 0, 10), Some(SwitchEdge::Press));
        assert_eq!(sw.on_timer_fire(false, 0, 11), None);
        assert!(sw.is_pressed());
        assert_eq!(sw.last_edge_ms(), 10);
    }

    #[test]
    fn switch_bounce_back_to_stable_level_is_ignored() {
        let mut sw = DebouncedSwitch::new(24, true, 10, Trigger::OnPress);
        sw.on_edge_interrupt();
        assert_eq!(sw.on_timer_fire(true, 0, 10), None);
        assert!(!sw.is_pending());
        assert!(sw.stable_level());
    }

    #[test]
    fn switch_release_trigger_skips_press() {
        let mut sw = DebouncedSwitch::new(24, true, 10, Trigger::OnRelease);
        sw.on_edge_interrupt();
        assert_eq!(sw.on_timer_fire(false, 0, 10), None);
        assert!(sw.is_pressed());

        sw.on_edge_interrupt();
        assert_eq!(sw.on_timer_fire(true, 0, 40), Some(SwitchEdge::Release));
    }

    #[test]
    fn switch_disable_drops_timer_in_flight() {
        let mut sw = DebouncedSwitch::new(24, true, 10, Trigger::OnPress);
        let Debounce::Arm { epoch, .. } = sw.on_edge_interrupt() else {
            panic!("expected arm");
        };
        sw.disable();
        sw.disable();
        assert!(!sw.is_enabled());
        assert_eq!(sw.on_timer_fire(false, epoch, 10), None);
        assert_eq!(sw.on_edge_interrupt(), Debounce::Ignore);
        assert!(sw.stable_level());
    }

    // ════════════════════════════════════════════════════════════════════════
    // QuadratureDecoder
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn step_table_matches_both_cycles() {
        assert_eq!(step_direction(0, 1), Some(Direction::Clockwise));
        assert_eq!(step_direction(2, 0), Some(Direction::Clockwise));
        assert_eq!(step_direction(0, 2), Some(Direction::CounterClockwise));
        assert_eq!(step_direction(1, 0), Some(Direction::CounterClockwise));
        assert_eq!(step_direction(0, 3), None);
        assert_eq!(step_direction(1, 2), None);
        assert_eq!(step_direction(2, 2), None);
    }

    #[test]
    fn clockwise_cycle_counts_up() {
        let mut d = QuadratureDecoder::new(0, 0, 10, false);
        feed(&mut d, &CW, 1000, 5);
        assert_eq!(d.get_counter(), (1, Direction::Clockwise));
        assert_eq!(d.transition_count(), 0);
    }

    #[test]
    fn counter_clockwise_cycle_counts_down() {
        let mut d = QuadratureDecoder::new(0, 0, 10, false);
        assert!(d.set_counter(5));
        feed(&mut d, &CCW, 1000, 5);
        assert_eq!(d.get_counter(), (4, Direction::CounterClockwise));
    }

    #[test]
    fn several_cycles_accumulate() {
        let mut d = QuadratureDecoder::new(0, 0, 10, false);
        let mut now = feed(&mut d, &CW, 1000, 5);
        now = feed(&mut d, &CW, now, 5);
        now = feed(&mut d, &CW, now, 5);
        feed(&mut d, &CCW, now, 5);
        assert_eq!(d.get_counter().0, 2);
    }

    #[test]
    fn partial_cycle_does_not_move() {
        let mut d = QuadratureDecoder::new(0, 0, 10, false);
        feed(&mut d, &[1, 3, 2], 1000, 5);
        assert_eq!(d.get_counter(), (0, Direction::None));
        assert_eq!(d.transition_count(), 3);
    }

    #[test]
    fn mixed_cycle_is_noise() {
        let mut d = QuadratureDecoder::new(0, 0, 10, false);
        // Two clockwise steps, then back the other way.
        feed(&mut d, &[1, 3, 1, 0], 1000, 5);
        assert_eq!(d.get_counter().0, 0);
    }

    #[test]
    fn diagonal_step_discards_partial_cycle() {
        let mut d = QuadratureDecoder::new(0, 0, 10, false);
        feed(&mut d, &[1, 2, 0, 1], 1000, 5);
        assert_eq!(d.get_counter().0, 0);
        assert_eq!(d.transition_count(), 2);
    }

    #[test]
    fn slow_cycle_times_out() {
        let mut d = QuadratureDecoder::new(0, 0, 10, false);
        feed(&mut d, &[1, 3], 1000, 5);
        feed(&mut d, &[2, 0], 1200, 5);
        assert_eq!(d.get_counter().0, 0);
        assert_eq!(d.transition_count(), 2);
    }

    #[test]
    fn rollover_wraps_to_opposite_bound() {
        let mut d = QuadratureDecoder::new(0, 0, 3, true);
        assert!(d.set_counter(3));
        feed(&mut d, &CW, 1000, 5);
        assert_eq!(d.get_counter().0, 0);

        let mut d = QuadratureDecoder::new(0, 0, 3, true);
        feed(&mut d, &CCW, 1000, 5);
        assert_eq!(d.get_counter().0, 3);
    }

    #[test]
    fn without_rollover_counter_clamps() {
        let mut d = QuadratureDecoder::new(0, 0, 3, false);
        assert!(d.set_counter(3));
        feed(&mut d, &CW, 1000, 5);
        assert_eq!(d.get_counter().0, 3);

        let mut d = QuadratureDecoder::new(0, 0, 3, false);
        feed(&mut d, &CCW, 1000, 5);
        assert_eq!(d.get_counter().0, 0);
    }

    #[test]
    fn set_counter_rejects_out_of_range() {
        let mut d = QuadratureDecoder::new(0, 1, 5, false);
        assert!(!d.set_counter(0));
        assert!(!d.set_counter(6));
        assert!(d.set_counter(5));
        assert_eq!(d.get_counter().0, 5);

        d.reset_counter();
        assert_eq!(d.get_counter(), (1, Direction::None));
    }

    #[test]
    fn reversed_bounds_are_swapped() {
        let d = QuadratureDecoder::new(0, 9, 2, false);
        assert_eq!(d.bounds(), (2, 9));
        assert_eq!(d.get_counter().0, 2);
    }

    #[test]
    fn decoder_edge_ignored_while_pending() {
        let mut d = QuadratureDecoder::new(0, 0, 3, false).with_timing(2, 150);
        assert_eq!(d.on_channel_edge_interrupt(), Debounce::Arm { delay_ms: 2, epoch: 0 });
        assert_eq!(d.on_channel_edge_interrupt(), Debounce::Ignore);
    }

    #[test]
    fn decoder_disable_drops_timer_in_flight() {
        let mut d = QuadratureDecoder::new(0, 0, 3, false);
        let Debounce::Arm { epoch, .. } = d.on_channel_edge_interrupt() else {
            panic!("expected arm");
        };
        d.disable();
        d.disable();
        assert_eq!(d.on_timer_fire(false, true, epoch, 1000), None);
        assert_eq!(d.state(), 0);
        assert_eq!(d.on_channel_edge_interrupt(), Debounce::Ignore);
    }

    // ════════════════════════════════════════════════════════════════════════
    // EncoderHub
    // ════════════════════════════════════════════════════════════════════════

    fn rotate(hub: &EncoderHub<Mx>, states: &[u8], start_ms: u64) {
        let mut now = start_ms;
        for &s in states {
            if let Debounce::Arm { epoch, .. } = hub.dispatch(InputEvent::ChannelEdge, now) {
                let (a, b) = (s & 0b10 != 0, s & 0b01 != 0);
                hub.dispatch(InputEvent::ChannelSettled { a, b, epoch }, now + 2);
            }
            now += 5;
        }
    }

    #[test]
    fn hub_ignores_input_while_detached() {
        let hub: EncoderHub<Mx> = EncoderHub::new();
        assert_eq!(hub.dispatch(InputEvent::ChannelEdge, 0), Debounce::Ignore);
        assert_eq!(hub.counter(), None);
        assert!(!hub.detach());
    }

    #[test]
    fn hub_counts_and_confirms() {
        let hub: EncoderHub<Mx> = EncoderHub::new();
        hub.attach(Encoder::bounded(Levels::IDLE, 0, 9, false, Trigger::OnPress));
        rotate(&hub, &CW, 1000);
        assert_eq!(hub.counter(), Some((1, Direction::Clockwise)));
        assert_eq!(hub.levels().quadrature(), 0);

        let Debounce::Arm { epoch, .. } = hub.dispatch(InputEvent::SwitchEdge, 2000) else {
            panic!("expected arm");
        };
        hub.dispatch(InputEvent::SwitchSettled { level: false, epoch }, 2010);
        assert!(hub.take_confirm());
        assert!(!hub.take_confirm());
    }

    #[test]
    fn stale_timer_cannot_reach_next_encoder() {
        let hub: EncoderHub<Mx> = EncoderHub::new();
        hub.attach(Encoder::bounded(Levels::IDLE, 0, 9, false, Trigger::OnPress));
        let Debounce::Arm { epoch: old, .. } = hub.dispatch(InputEvent::SwitchEdge, 0) else {
            panic!("expected arm");
        };
        assert!(hub.detach());

        hub.attach(Encoder::bounded(Levels::IDLE, 0, 9, false, Trigger::OnPress));
        let Debounce::Arm { epoch: new, .. } = hub.dispatch(InputEvent::SwitchEdge, 5) else {
            panic!("expected arm");
        };
        assert_ne!(old, new);

        hub.dispatch(InputEvent::SwitchSettled { level: false, epoch: old }, 10);
        assert!(!hub.take_confirm());
        hub.dispatch(InputEvent::SwitchSettled { level: false, epoch: new }, 15);
        assert!(hub.take_confirm());
    }

    #[test]
    fn aux_button_queues_its_event() {
        let queue: AuxiliaryQueue<Mx> = Fifo::new();
        let mut button = AuxButton::new(25, true, AuxEvent::RadioPower);
        let Debounce::Arm { epoch, .. } = button.on_edge_interrupt() else {
            panic!("expected arm");
        };
        assert!(button.on_timer_fire(false, epoch, 10, &queue));
        assert_eq!(queue.pop(), Some(AuxEvent::RadioPower));

        button.on_edge_interrupt();
        assert!(!button.on_timer_fire(true, epoch, 50, &queue));
        assert!(queue.is_empty());
    }

    // ════════════════════════════════════════════════════════════════════════
    // EventMailbox
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn fifo_pops_in_order_and_rejects_overflow() {
        let q: Fifo<Mx, u8, 2> = Fifo::new();
        assert!(q.is_empty());
        q.push(1).unwrap();
        q.push(2).unwrap();
        assert_eq!(q.push(3), Err(Error::QueueFull));
        assert_eq!(q.size(), 2);
        assert_eq!(q.pop(), Some(1));
        assert_eq!(q.pop(), Some(2));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn fifo_clear_reports_dropped() {
        let q: Fifo<Mx, u8, 4> = Fifo::new();
        q.push(1).unwrap();
        q.push(2).unwrap();
        assert_eq!(q.clear(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn mailbox_queues_are_independent() {
        let mailbox: EventMailbox<Mx> = EventMailbox::new();
        mailbox.navigation.push(Context::to(menus::MAIN_MENU)).unwrap();
        mailbox.auxiliary.push(AuxEvent::Snooze).unwrap();
        mailbox.report(Report::AlarmDisabled);

        assert_eq!(mailbox.navigation.size(), 1);
        assert_eq!(mailbox.auxiliary.pop(), Some(AuxEvent::Snooze));
        assert_eq!(mailbox.reporting.pop(), Some(Report::AlarmDisabled));
        assert_eq!(
            mailbox.navigation.pop().and_then(|c| c.router.next_screen_id),
            Some("main_menu".try_into().unwrap())
        );
    }

    // ════════════════════════════════════════════════════════════════════════
    // Context
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn context_fields_and_defaults() {
        let ctx = Context::to("set_time")
            .with_text(keys::HEADER, "hour")
            .with_int(keys::MIN, 0)
            .with_flag(keys::SNOOZE, true);
        assert_eq!(ctx.next_screen_id(), Some("set_time"));
        assert_eq!(ctx.text(keys::HEADER), Some("hour"));
        assert_eq!(ctx.int(keys::MIN), Some(0));
        assert_eq!(ctx.int_or(keys::MAX, 59), 59);
        assert!(ctx.flag(keys::SNOOZE));
        assert_eq!(ctx.int(keys::HEADER), None);

        let empty = Context::default();
        assert_eq!(empty.next_screen_id(), None);
        assert!(!empty.flag(keys::SNOOZE));
    }

    #[test]
    fn overlong_text_is_truncated() {
        assert_eq!(truncated("a very long menu label").len(), 16);
        assert_eq!(Context::to("no_such_screen_id_at_all").next_screen_id(), None);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Screens (pure parts)
    // ════════════════════════════════════════════════════════════════════════

    fn three_items() -> ListMenu {
        let mut items = heapless::Vec::new();
        for (label, target) in [("Time", "time_menu"), ("Alarm", "alarm_menu"), ("Radio", "radio_menu")] {
            let _ = items.push(MenuItem::new(label, target));
        }
        ListMenu::new("Main Menu", items)
    }

    #[test]
    fn list_menu_counter_two_selects_second_item() {
        let mut menu = three_items();
        assert_eq!(menu.counter_range(), (1, 3));
        assert!(menu.update(2));
        assert_eq!(menu.cursor(), 1);
        assert_eq!(menu.confirm().next_screen_id(), Some("alarm_menu"));
    }

    #[test]
    fn list_menu_render_marks_cursor() {
        let mut menu = three_items();
        menu.update(3);
        let frame = menu.render();
        assert_eq!(frame[0].text.as_str(), "Main Menu");
        assert_eq!(frame[1].text.as_str(), "  Time");
        assert_eq!(frame[3].text.as_str(), "> Radio");
        assert_eq!(frame[3].row, 3);
    }

    #[test]
    fn cursor_wraps_modulo_item_count() {
        assert_eq!(cursor_for(1, 3), 0);
        assert_eq!(cursor_for(4, 3), 0);
        assert_eq!(cursor_for(0, 3), 2);
        assert_eq!(cursor_for(5, 0), 0);
    }

    #[test]
    fn item_context_travels_with_confirm() {
        let mut items = heapless::Vec::new();
        let _ = items.push(
            MenuItem::new("07:30:00", menus::DELETE_ALARM)
                .with_context(Context::default().with_int(keys::ALARM_ID, 3)),
        );
        let menu = ListMenu::new("Alarms", items);
        let next = menu.confirm();
        assert_eq!(next.next_screen_id(), Some(menus::DELETE_ALARM));
        assert_eq!(next.int(keys::ALARM_ID), Some(3));
    }

    #[test]
    fn editor_chains() {
        let hour = EditorField::Alarm(DateTimeField::Hour);
        assert_eq!(hour.next(), Some(EditorField::Alarm(DateTimeField::Minute)));
        assert_eq!(
            EditorField::Clock(DateTimeField::Second).next(),
            None
        );
        assert_eq!(
            EditorField::Clock(DateTimeField::Year).next().map(EditorField::screen),
            Some(menus::SET_DATE)
        );
        assert_eq!(EditorField::FrequencyMhz.next(), Some(EditorField::FrequencyTenths));
        assert_eq!(EditorField::Clock(DateTimeField::Minute).default_bounds(), (0, 59));
        assert_eq!(EditorField::Volume.trigger(), Trigger::OnRelease);
    }

    #[test]
    fn every_screen_id_resolves() {
        for (id, _) in menus::SCREENS {
            assert_eq!(menus::resolve(id).map(|(name, _)| name), Ok(*id));
            assert!(Context::to(id).next_screen_id().is_some());
        }
        assert_eq!(menus::resolve("no_such_screen").err(), Some(Error::UnknownScreen));
    }

    // ════════════════════════════════════════════════════════════════════════
    // Records and settings
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn alarm_record_format() {
        let t = AlarmTime::new(7, 30, 0).unwrap();
        assert_eq!(t.encode().as_str(), "07\n30\n00");
        assert_eq!(AlarmTime::parse(" 7\n30 \n0\n"), Ok(t));
        assert_eq!(AlarmTime::parse("25\n00\n00"), Err(Error::CorruptRecord));
        assert_eq!(AlarmTime::parse("07\n30"), Err(Error::CorruptRecord));
        assert_eq!(t.label().as_str(), "07:30:00");
    }

    #[test]
    fn new_alarm_takes_lowest_free_slot() {
        let mut store = MemoryStore::new();
        let t = AlarmTime::new(6, 0, 0).unwrap();
        assert_eq!(alarms::new_alarm(&mut store, t), Ok(0));
        assert_eq!(alarms::new_alarm(&mut store, t), Ok(1));
        alarms::delete_alarm(&mut store, 0).unwrap();
        assert_eq!(alarms::new_alarm(&mut store, t), Ok(0));
        assert_eq!(alarms::list_alarms(&mut store).unwrap().len(), 2);
    }

    #[test]
    fn alarm_slots_run_out() {
        let mut store = MemoryStore::new();
        let t = AlarmTime::default();
        for _ in 0..crate::config::MAX_ALARMS {
            alarms::new_alarm(&mut store, t).unwrap();
        }
        assert_eq!(alarms::new_alarm(&mut store, t), Err(Error::AlarmSlotsFull));
    }

    #[test]
    fn corrupt_alarm_is_skipped_in_list() {
        let mut store = MemoryStore::new();
        store.write(RecordKey::Alarm(0), b"garbage").unwrap();
        alarms::save_alarm(&mut store, 1, AlarmTime::new(8, 0, 0).unwrap()).unwrap();
        let list = alarms::list_alarms(&mut store).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].0, 1);
    }

    #[test]
    fn snooze_replaces_previous_and_rejects_duplicates() {
        let mut store = MemoryStore::new();
        let (_, first) = alarms::new_snooze(&mut store, &at(7, 30, 0), 1).unwrap();
        assert_eq!(first, AlarmTime::new(7, 31, 0).unwrap());
        alarms::new_snooze(&mut store, &at(7, 31, 0), 1).unwrap();
        assert_eq!(alarms::snooze(&mut store).unwrap().map(|(_, t)| t.minute), Some(32));

        store.write(RecordKey::Snooze(3), b"01\n02\n03").unwrap();
        assert_eq!(alarms::snooze(&mut store), Err(Error::MultipleSnoozes));
        assert!(Error::MultipleSnoozes.is_fatal());

        assert_eq!(alarms::clear_snoozes(&mut store), Ok(2));
        assert_eq!(alarms::snooze(&mut store), Ok(None));
    }

    #[test]
    fn settings_default_when_missing_or_corrupt() {
        let mut store = MemoryStore::new();
        assert_eq!(settings::load_time_mode(&mut store), TimeMode::TwentyFourHour);
        assert_eq!(settings::load_timezone(&mut store).code, "UTC");

        store.write(RecordKey::TimeMode, b"7").unwrap();
        store.write(RecordKey::Timezone, b"XYZ").unwrap();
        assert_eq!(settings::load_time_mode(&mut store), TimeMode::TwentyFourHour);
        assert_eq!(settings::load_timezone(&mut store).code, "UTC");

        settings::save_time_mode(&mut store, TimeMode::TwelveHour).unwrap();
        settings::save_timezone(&mut store, TIMEZONES[3]).unwrap();
        assert_eq!(settings::load_time_mode(&mut store), TimeMode::TwelveHour);
        assert_eq!(settings::load_timezone(&mut store).offset_hours, -8);
    }

    #[test]
    fn record_file_names() {
        assert_eq!(RecordKey::Alarm(2).file_name().as_str(), "alarm_2.txt");
        assert_eq!(RecordKey::Snooze(0).file_name().as_str(), "snooze_0.txt");
        assert_eq!(RecordKey::TimeMode.file_name().as_str(), "time_mode_config.txt");
        assert_eq!(RecordKey::Timezone.file_name().as_str(), "timezone_config.txt");
    }

    // ════════════════════════════════════════════════════════════════════════
    // Clock
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn time_formats() {
        let dt = at(19, 5, 9);
        assert_eq!(clock::format_time(&dt, TimeMode::TwentyFourHour).as_str(), "19:05:09");
        assert_eq!(clock::format_time(&dt, TimeMode::TwelveHour).as_str(), "07:05:09 PM");
        assert_eq!(clock::format_date(&dt, TIMEZONES[0]).as_str(), "2024-07-04-UTC");
    }

    #[test]
    fn local_time_round_trips_through_utc() {
        let cst = TIMEZONES[1];
        let local = clock::to_local(at(3, 0, 0), cst);
        assert_eq!(local, NaiveDate::from_ymd_opt(2024, 7, 3).unwrap().and_hms_opt(21, 0, 0).unwrap());
        assert_eq!(clock::to_utc(local, cst), at(3, 0, 0));
    }

    #[test]
    fn set_field_clamps_day_to_month() {
        let jan31 = NaiveDate::from_ymd_opt(2023, 1, 31).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let feb = clock::set_field(jan31, DateTimeField::Month, 2).unwrap();
        assert_eq!(feb.date(), NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());
        assert_eq!(clock::set_field(jan31, DateTimeField::Hour, 24), None);
        assert_eq!(clock::days_in_month(2024, 2), 29);
    }

    #[test]
    fn bcd_conversion() {
        assert_eq!(clock::bcd_encode(59), 0x59);
        assert_eq!(clock::bcd_decode(0x23), 23);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Status text
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn status_texts() {
        assert_eq!(radio_text(1031, 2).as_str(), "103.1MHz Vol: 2");
        assert_eq!(battery_label(3700), "Good");
        assert_eq!(battery_label(3100), "Low");
        assert_eq!(battery_label(2900), "Critical");
        assert_eq!(report_text(Report::AlarmDeleted(4)).as_str(), "Alarm 4 deleted");
        assert_eq!(
            report_text(Report::SnoozeActive(AlarmTime::new(7, 31, 0).unwrap())).as_str(),
            "Snooze 07:31:00"
        );
    }
}
