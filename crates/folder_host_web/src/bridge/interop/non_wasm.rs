use super::*;

fn unsupported() -> String {
    "Browser folder APIs are only available when compiled for wasm32".to_string()
}

pub async fn load_folder() -> Result<Option<Rc<dyn DirectoryHandle>>, String> {
    Ok(None)
}

pub async fn save_folder(_folder: &dyn DirectoryHandle) -> Result<(), String> {
    Err(unsupported())
}

pub async fn cache_get_text(_key: &str) -> Result<Option<String>, String> {
    Ok(None)
}

pub async fn cache_put_text(_key: &str, _raw_json: &str) -> Result<(), String> {
    Ok(())
}

pub async fn pick_directory() -> Result<Rc<dyn DirectoryHandle>, HandleError> {
    Err(HandleError::Unsupported(unsupported()))
}

pub async fn open_helper_window(_width: u32, _height: u32) -> Result<(), String> {
    Err(unsupported())
}

pub async fn open_document(
    _name: &str,
    _bytes: &[u8],
    _revoke_after_ms: u32,
) -> Result<(), String> {
    Err(unsupported())
}

pub async fn clipboard_write(_text: &str) -> Result<(), String> {
    Err(unsupported())
}

pub async fn clipboard_write_fallback(_text: &str) -> Result<(), String> {
    Err(unsupported())
}
