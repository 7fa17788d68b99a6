pub mod banner;
pub mod icons;

pub use banner::{print_build_banner, print_clean_summary, print_configure_banner, print_done};
