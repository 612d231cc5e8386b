pub mod cli;
pub mod toml_config;

pub const MIN_SAMPLE_SIZE: usize = 64;
pub const MAX_SAMPLE_SIZE: usize = 1024 * 1024;
pub const MAX_PREVIEW_ROWS: usize = 100;
pub const INPUT_EXTENSIONS: [&str; 3] = ["csv", "txt", "tsv"];
pub const DEFAULT_OUTPUT_FILE: &str = "google_contacts.csv";

#[cfg(feature = "cli")]
pub use self::args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use super::*;
    use crate::core::sniffer::DEFAULT_SAMPLE_SIZE;
    use crate::core::ConfigProvider;
    use crate::utils::error::Result;
    use crate::utils::validation::{
        validate_file_extension, validate_path, validate_range, Validate,
    };
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "contacts-convert")]
    #[command(about = "Convert a Turkish contacts export into a Google Contacts CSV")]
    pub struct CliConfig {
        /// Contacts export to convert (csv, txt or tsv)
        pub input: String,

        /// Where to write the Google Contacts CSV
        #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
        pub output: String,

        /// Bytes inspected when guessing the delimiter
        #[arg(long, default_value_t = DEFAULT_SAMPLE_SIZE)]
        pub sample_size: usize,

        /// Print the first N source and converted rows
        #[arg(long, default_value_t = 0)]
        pub preview: usize,

        /// Print the preview as JSON instead of text
        #[arg(long)]
        pub preview_json: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON lines")]
        pub log_json: bool,
    }

    impl ConfigProvider for CliConfig {
        fn input_path(&self) -> &str {
            &self.input
        }

        fn output_path(&self) -> &str {
            &self.output
        }

        fn sample_size(&self) -> usize {
            self.sample_size
        }

        fn preview_rows(&self) -> usize {
            self.preview
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_path("input", &self.input)?;
            validate_file_extension("input", &self.input, &INPUT_EXTENSIONS)?;
            validate_path("output", &self.output)?;
            validate_range("sample_size", self.sample_size, MIN_SAMPLE_SIZE, MAX_SAMPLE_SIZE)?;
            validate_range("preview", self.preview, 0, MAX_PREVIEW_ROWS)?;
            Ok(())
        }
    }

}
