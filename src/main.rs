// Mon Oct 19 2026 - Alex

use class_layout::ui::{cli, ErrorDisplay};

fn main() {
    if let Err(e) = cli::run() {
        ErrorDisplay::new().print_report(&e);
        std::process::exit(1);
    }
}
