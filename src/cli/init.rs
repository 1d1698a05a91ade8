use dialoguer::Input;

use crate::error::Result;
use crate::settings::{load_settings, save_settings, shellexpand_path, Settings};

pub fn run(data_dir: Option<String>) -> Result<()> {
    let mut settings = load_settings();

    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    } else {
        let chosen: String = Input::new()
            .with_prompt("Data directory")
            .default(Settings::default().data_dir)
            .interact_text()?;
        settings.data_dir = shellexpand_path(&chosen);
    }

    save_settings(&settings)?;
    std::fs::create_dir_all(settings.data_dir())?;
    std::fs::create_dir_all(settings.ruleset_dir())?;

    println!("Initialized tally at {}", settings.data_dir().display());
    println!("Drop account exports (checking.csv, visa.csv, savings.csv) there and run `tally categorize`.");
    Ok(())
}
