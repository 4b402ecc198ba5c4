#![doc = r#"
inkprep — fetch archive images and normalize them for a fixed-resolution e-ink panel.

Two independent stages, each usable from the `inkprep` CLI or as a library:

- **fetch**: download each identifier of a source list into a working directory,
  naming files after the segment that follows a delimiter in the identifier.
- **normalize**: shrink every decodable image of a directory to fit a fixed canvas
  (825x1200 by default, never enlarging), center it on a solid background and save
  it as `1.jpg`, `2.jpg`, ... in an output directory.

Normalize a directory
---------------------
```rust,no_run
use std::path::Path;
use inkprep::{normalize_directory, CanvasProfile, EnumerationOrder, TracingReporter};

fn main() -> inkprep::Result<()> {
    let report = normalize_directory(
        Path::new("raw_images"),
        Path::new("inkplate"),
        &CanvasProfile::default(),
        EnumerationOrder::Name,
        true, // continue_on_error
        &mut TracingReporter,
    )?;

    println!("processed={} skipped={} errors={}", report.processed, report.skipped, report.errors);
    Ok(())
}
```

Another device
--------------
```rust
use inkprep::{CanvasProfile, Rgb};

let kindle = CanvasProfile {
    width: 1072,
    height: 1448,
    background: Rgb::new(255, 255, 255),
    ..CanvasProfile::default()
};
assert!(kindle.validate().is_ok());
```

Fetch
-----
```rust,no_run
use inkprep::{fetch_to_directory, read_source_list, FetchParams, HttpTransport, TracingReporter};

fn main() -> inkprep::Result<()> {
    let identifiers = read_source_list(std::path::Path::new("urls.csv"))?;
    let transport = HttpTransport::new()?;
    let report = fetch_to_directory(
        &identifiers,
        &transport,
        &FetchParams::default(),
        true,
        &mut TracingReporter,
    )?;
    println!("downloaded={} failed={}", report.downloaded, report.failed);
    Ok(())
}
```

Error handling
--------------
All public functions return `inkprep::Result<T>`. Per-item failures inside a batch
are reported, not returned; match on `inkprep::Error` for single-item calls:

```rust,no_run
use std::path::Path;
use inkprep::{normalize_file, CanvasProfile, Error};

match normalize_file(Path::new("in.png"), Path::new("1.jpg"), &CanvasProfile::default()) {
    Ok(placement) => println!("pasted at ({}, {})", placement.x, placement.y),
    Err(Error::Decode { path, .. }) => eprintln!("not an image: {}", path.display()),
    Err(Error::Persist { path, source }) => eprintln!("cannot save {}: {source}", path.display()),
    Err(other) => eprintln!("{other}"),
}
```
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
pub use crate::core::params::{CanvasProfile, FetchParams};
pub use crate::core::processing::pipeline::{Canvas, Placement};
pub use error::{Error, Result};
pub use types::{EnumerationOrder, ResizeFilter, Rgb};

pub use io::fetch::{HttpTransport, Retrieved, Transport};
pub use io::source::{SourceRef, parse_source_list, read_source_list};

pub use api::{
    FetchReport, ItemFailure, ItemOutcome, NormalizeReport, Reporter, Stage, TracingReporter,
    fetch_to_directory, normalize_directory, normalize_file, normalize_image, write_report_json,
};
