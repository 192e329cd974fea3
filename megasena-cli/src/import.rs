use anyhow::{Context, Result};
use std::path::Path;

pub fn read_import_file(path: &Path) -> Result<String> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Não foi possível abrir {:?}", path))?;
    Ok(text.trim_start_matches('\u{feff}').to_string())
}

pub fn write_export_file(path: &Path, json: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Não foi possível criar o diretório {:?}", parent))?;
    }
    std::fs::write(path, json).with_context(|| format!("Não foi possível gravar {:?}", path))?;
    log::info!("Histórico exportado para {:?}", path);
    Ok(())
}
