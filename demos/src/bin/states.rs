use cursive::traits::*;
use cursive::views::{Dialog, LinearLayout, TextView};
use cursive::Cursive;
use cursive_stateful::views::{EmptyView, ErrorView, LoadingView};
use cursive_stateful::{DisplayState, Settings, StateHandle, StatefulView};
use std::time::Duration;

// This example drives the state machine by hand.
//
// Each key requests a transition. Requests made while a fade is running
// wait for their turn: press `x` to queue a whole sequence at once and
// watch it play in order. Open the console with `~` to follow along.

fn main() {
    cursive::logger::init();

    let mut siv = cursive::default();

    let view = StatefulView::new(TextView::new(
        "This is the content.\n\nl: loading\ne: error\nm: empty\nc: content\nx: all of them\n\nUppercase keys skip the fade.",
    ))
    .with_settings(Settings::new().fade_duration(Duration::from_millis(600)))
    .with_cb_sink(siv.cb_sink().clone())
    .with_loading_view(LoadingView::new())
    .with_empty_view(EmptyView::new())
    .with_error_view(ErrorView::new().on_retry(|s| {
        s.add_layer(Dialog::info("Nothing to reload here."));
    }));

    let handle = view.handle();

    siv.add_layer(
        Dialog::around(LinearLayout::vertical().child(view.fixed_size((40, 12))))
            .title("States")
            .button("Quit", Cursive::quit),
    );

    for (key, state) in [
        ('l', DisplayState::showing("loading")),
        ('e', DisplayState::showing("error")),
        ('m', DisplayState::showing("empty")),
        ('c', DisplayState::Content),
    ] {
        siv.add_global_callback(key, request(&handle, state.clone(), true));
        siv.add_global_callback(key.to_ascii_uppercase(), request(&handle, state, false));
    }

    siv.add_global_callback('x', move |_| {
        for key in ["loading", "error", "empty"] {
            handle.request_transition(DisplayState::showing(key), true);
        }
        handle.request_transition(DisplayState::Content, true);
    });

    siv.add_global_callback('q', Cursive::quit);
    siv.add_global_callback('~', Cursive::toggle_debug_console);

    siv.set_fps(10);

    siv.run();
}

fn request(
    handle: &StateHandle,
    state: DisplayState,
    animated: bool,
) -> impl Fn(&mut Cursive) + Send + Sync + 'static {
    let handle = handle.clone();
    move |_| {
        let target = state.clone();
        handle.request_transition_with(state.clone(), animated, move || {
            log::info!("Now showing {target}");
        });
        log::info!(
            "Requested {}, current is {}",
            handle.last_requested_state(),
            handle.current_state()
        );
    }
}
