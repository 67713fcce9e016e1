pub mod config_loader;
pub mod dates;
pub mod deadline;
pub mod error;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod logging;
pub mod model;
pub mod palette;
pub mod session;
pub mod settings;
pub mod spreadsheet;
pub mod view;

pub use config_loader::{load_config, load_config_file, load_config_str};
pub use dates::{DateInput, Instant, format_long_date, parse_date};
pub use deadline::{DEFAULT_DDL_GAP_DAYS, Dated, derive_deadline};
pub use error::{EditError, InvalidDateError, TimelineError, TimelineResult, ValidationError};
pub use model::{ConferenceNode, Model, Program, TimePoint};
pub use palette::{CONFERENCE_COLOR, PALETTE, Rgb, color_for};
pub use session::TimelineSession;
pub use settings::Settings;
pub use spreadsheet::{
    DateCell, ExportRow, ExportSheet, RowWarning, SheetRow, SpreadsheetImport,
    export_model, export_spreadsheet_file, import_rows, import_spreadsheet_file,
};
pub use view::{ProgramView, timeline_view};
