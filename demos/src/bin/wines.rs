use cursive::traits::*;
use cursive::views::{Dialog, LinearLayout, SelectView, TextView};
use cursive::Cursive;
use cursive_stateful::views::{EmptyView, ErrorView, LoadingView};
use cursive_stateful::{StatefulController, StatefulView};
use rand::Rng;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

// This example shows a list filled by a (fake) slow network request.
//
// Each request randomly succeeds, comes back empty, or fails. The screen
// shows a placeholder when there is nothing else to show, and a small
// notice when a refresh fails while wines are already listed.

const WINES: &[&str] = &[
    "Chardonnay",
    "Riesling",
    "Pinot Noir",
    "Syrah",
    "Grenache",
    "Nebbiolo",
    "Tempranillo",
    "Sauvignon Blanc",
    "Gewürztraminer",
    "Chenin Blanc",
];

fn main() {
    cursive::logger::init();

    let mut siv = cursive::default();

    let items = Arc::new(AtomicUsize::new(0));

    let view = StatefulView::new(SelectView::<String>::new().with_name("wines").scrollable())
        .with_cb_sink(siv.cb_sink().clone())
        .with_loading_view(LoadingView::with_label("Fetching wines..."))
        .with_empty_view(EmptyView::with_label("No wines today."))
        .with_error_view(ErrorView::new().on_retry(refresh));

    // Errors are only reported here when wines are already listed.
    let cb_sink = siv.cb_sink().clone();
    let controller = StatefulController::new(view.handle(), {
        let items = Arc::clone(&items);
        move || items.load(Ordering::SeqCst) > 0
    })
    .on_error(move |err: FetchError| {
        cb_sink
            .send(Box::new(move |s: &mut Cursive| {
                s.add_layer(Dialog::info(format!("Could not refresh: {err}.")));
            }))
            .ok();
    });

    siv.add_layer(
        Dialog::around(
            LinearLayout::vertical()
                .child(view.fixed_size((40, 12)))
                .child(TextView::new("r: refresh, ~: logs, q: quit")),
        )
        .title("Wines"),
    );

    siv.add_global_callback('q', Cursive::quit);
    siv.add_global_callback('r', refresh);
    siv.add_global_callback('~', Cursive::toggle_debug_console);

    // Keeps the spinner turning.
    siv.set_fps(10);

    controller.setup_initial_state();
    siv.set_user_data(Screen {
        controller,
        items,
        loading: Arc::new(AtomicBool::new(false)),
    });
    refresh(&mut siv);

    siv.run();
}

#[derive(Debug)]
enum FetchError {
    Timeout,
    Closed,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            FetchError::Timeout => write!(f, "the cellar took too long to answer"),
            FetchError::Closed => write!(f, "the cellar is closed"),
        }
    }
}

impl std::error::Error for FetchError {}

// Everything needed to reload, stored as user data.
#[derive(Clone)]
struct Screen {
    controller: StatefulController<FetchError>,
    items: Arc<AtomicUsize>,
    loading: Arc<AtomicBool>,
}

fn refresh(s: &mut Cursive) {
    let screen = match s.user_data::<Screen>() {
        Some(screen) => screen.clone(),
        None => return,
    };

    if screen.loading.swap(true, Ordering::SeqCst) {
        log::info!("Already loading");
        return;
    }

    log::info!("Refreshing");
    screen.controller.start_loading(true);

    let cb_sink = s.cb_sink().clone();
    thread::spawn(move || {
        let result = fetch_wines();
        cb_sink
            .send(Box::new(move |s: &mut Cursive| show_wines(s, screen, result)))
            .ok();
    });
}

fn show_wines(s: &mut Cursive, screen: Screen, result: Result<Vec<String>, FetchError>) {
    screen.loading.store(false, Ordering::SeqCst);

    match result {
        Ok(wines) => {
            log::info!("Got {} wines", wines.len());
            screen.items.store(wines.len(), Ordering::SeqCst);
            s.call_on_name("wines", |view: &mut SelectView<String>| {
                view.clear();
                view.add_all_str(wines);
            });
            screen.controller.end_loading(true, None);
        }
        Err(err) => {
            log::warn!("Could not fetch wines: {err}");
            screen.controller.end_loading(true, Some(err));
        }
    }
}

// Pretends to ask a server for the list of wines.
fn fetch_wines() -> Result<Vec<String>, FetchError> {
    thread::sleep(Duration::from_secs(3));

    let mut rng = rand::thread_rng();
    match rng.gen_range(0..4) {
        0 => Ok(Vec::new()),
        1 => Err(FetchError::Timeout),
        2 => Err(FetchError::Closed),
        _ => {
            let count = rng.gen_range(1..=WINES.len());
            Ok(WINES[..count].iter().map(|wine| wine.to_string()).collect())
        }
    }
}
