use std::rc::Rc;

use folder_host::{DirectoryHandle, HandleError, PermissionMode, PermissionState};
use js_sys::{Array, Promise, Uint8Array};
use serde::Serialize;
use serde_wasm_bindgen::{from_value, Serializer};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::fs::WebDirectoryHandle;

#[wasm_bindgen(inline_js = r#"
const DB_NAME = 'PDF_Manager_DB';
const DB_VERSION = 2;
const HANDLE_STORE = 'handles';
const CACHE_STORE = 'cache';
const LAST_FOLDER_KEY = 'lastFolder';

function requestToPromise(req) {
  return new Promise((resolve, reject) => {
    req.onsuccess = () => resolve(req.result);
    req.onerror = () => reject(req.error || new Error('IndexedDB request failed'));
  });
}

function txDone(tx) {
  return new Promise((resolve, reject) => {
    tx.oncomplete = () => resolve();
    tx.onabort = () => reject(tx.error || new Error('IndexedDB transaction aborted'));
    tx.onerror = () => reject(tx.error || new Error('IndexedDB transaction error'));
  });
}

async function openDb() {
  if (typeof indexedDB === 'undefined') {
    throw new Error('IndexedDB is unavailable in this browser context');
  }
  return await new Promise((resolve, reject) => {
    const req = indexedDB.open(DB_NAME, DB_VERSION);
    req.onupgradeneeded = () => {
      const db = req.result;
      if (!db.objectStoreNames.contains(HANDLE_STORE)) db.createObjectStore(HANDLE_STORE);
      if (!db.objectStoreNames.contains(CACHE_STORE)) db.createObjectStore(CACHE_STORE);
    };
    req.onsuccess = () => resolve(req.result);
    req.onerror = () => reject(req.error || new Error('Failed to open IndexedDB'));
  });
}

async function withStore(storeName, mode, fn) {
  const db = await openDb();
  const tx = db.transaction(storeName, mode);
  const result = await fn(tx.objectStore(storeName));
  await txDone(tx);
  return result;
}

function mimeFor(name) {
  return name.toLowerCase().endsWith('.pdf') ? 'application/pdf' : '';
}

export async function jsLoadFolder() {
  const handle = await withStore(HANDLE_STORE, 'readonly', (store) => requestToPromise(store.get(LAST_FOLDER_KEY)));
  return handle ?? null;
}

export async function jsSaveFolder(handle) {
  await withStore(HANDLE_STORE, 'readwrite', (store) => requestToPromise(store.put(handle, LAST_FOLDER_KEY)));
}

export async function jsCacheGet(key) {
  const value = await withStore(CACHE_STORE, 'readonly', (store) => requestToPromise(store.get(key)));
  return value ?? null;
}

export async function jsCachePut(key, value) {
  await withStore(CACHE_STORE, 'readwrite', (store) => requestToPromise(store.put(value, key)));
}

export function jsHandleName(handle) { return handle.name; }
export function jsHandleKind(handle) { return handle.kind; }
export function jsSupportsMove(handle) { return typeof handle.move === 'function'; }

export async function jsQueryPermission(handle, mode) { return await handle.queryPermission({ mode }); }
export async function jsRequestPermission(handle, mode) { return await handle.requestPermission({ mode }); }

export async function jsChildren(handle) {
  const out = [];
  for await (const entry of handle.values()) out.push(entry);
  return out;
}

export async function jsDirectory(handle, name) { return await handle.getDirectoryHandle(name); }
export async function jsFile(handle, name, create) { return await handle.getFileHandle(name, { create }); }
export async function jsRemoveEntry(handle, name, recursive) { await handle.removeEntry(name, { recursive }); }
export async function jsMove(handle, name) { await handle.move(name); }

export async function jsLastModified(handle) {
  const file = await handle.getFile();
  return file.lastModified;
}

export async function jsReadFile(handle) {
  const file = await handle.getFile();
  return new Uint8Array(await file.arrayBuffer());
}

export async function jsWriteFile(handle, bytes) {
  const writable = await handle.createWritable();
  try {
    await writable.write(bytes);
    await writable.close();
  } catch (err) {
    try { await writable.abort(); } catch (_) {}
    throw err;
  }
}

export async function jsPickDirectory() {
  if (typeof window === 'undefined' || typeof window.showDirectoryPicker !== 'function') {
    throw new Error('Directory picker is unavailable in this browser context');
  }
  return await window.showDirectoryPicker({ mode: 'readwrite' });
}

export async function jsOpenHelperWindow(width, height) {
  await chrome.windows.create({
    url: chrome.runtime.getURL('popup.html?picker=1'),
    type: 'popup',
    width,
    height,
    focused: true,
  });
}

export async function jsOpenDocument(name, bytes, revokeAfterMs) {
  const url = URL.createObjectURL(new Blob([bytes], { type: mimeFor(name) }));
  try {
    await chrome.tabs.create({ url });
  } finally {
    setTimeout(() => URL.revokeObjectURL(url), revokeAfterMs);
  }
}

export async function jsClipboardWrite(text) { await navigator.clipboard.writeText(text); }

export function jsClipboardFallback(text) {
  const area = document.createElement('textarea');
  area.value = text;
  area.style.position = 'fixed';
  area.style.opacity = '0';
  document.body.appendChild(area);
  area.select();
  const copied = document.execCommand('copy');
  area.remove();
  if (!copied) throw new Error('copy command was rejected');
}
"#)]
extern "C" {
    #[wasm_bindgen(js_name = jsLoadFolder)]
    fn js_load_folder() -> Promise;
    #[wasm_bindgen(js_name = jsSaveFolder)]
    fn js_save_folder(handle: &JsValue) -> Promise;
    #[wasm_bindgen(js_name = jsCacheGet)]
    fn js_cache_get(key: &str) -> Promise;
    #[wasm_bindgen(js_name = jsCachePut)]
    fn js_cache_put(key: &str, value: JsValue) -> Promise;

    #[wasm_bindgen(js_name = jsHandleName)]
    fn js_handle_name(handle: &JsValue) -> String;
    #[wasm_bindgen(js_name = jsHandleKind)]
    fn js_handle_kind(handle: &JsValue) -> String;
    #[wasm_bindgen(js_name = jsSupportsMove)]
    fn js_supports_move(handle: &JsValue) -> bool;

    #[wasm_bindgen(js_name = jsQueryPermission)]
    fn js_query_permission(handle: &JsValue, mode: &str) -> Promise;
    #[wasm_bindgen(js_name = jsRequestPermission)]
    fn js_request_permission(handle: &JsValue, mode: &str) -> Promise;
    #[wasm_bindgen(js_name = jsChildren)]
    fn js_children(handle: &JsValue) -> Promise;
    #[wasm_bindgen(js_name = jsDirectory)]
    fn js_directory(handle: &JsValue, name: &str) -> Promise;
    #[wasm_bindgen(js_name = jsFile)]
    fn js_file(handle: &JsValue, name: &str, create: bool) -> Promise;
    #[wasm_bindgen(js_name = jsRemoveEntry)]
    fn js_remove_entry(handle: &JsValue, name: &str, recursive: bool) -> Promise;
    #[wasm_bindgen(js_name = jsMove)]
    fn js_move(handle: &JsValue, name: &str) -> Promise;
    #[wasm_bindgen(js_name = jsLastModified)]
    fn js_last_modified(handle: &JsValue) -> Promise;
    #[wasm_bindgen(js_name = jsReadFile)]
    fn js_read_file(handle: &JsValue) -> Promise;
    #[wasm_bindgen(js_name = jsWriteFile)]
    fn js_write_file(handle: &JsValue, bytes: &Uint8Array) -> Promise;

    #[wasm_bindgen(js_name = jsPickDirectory)]
    fn js_pick_directory() -> Promise;
    #[wasm_bindgen(js_name = jsOpenHelperWindow)]
    fn js_open_helper_window(width: u32, height: u32) -> Promise;
    #[wasm_bindgen(js_name = jsOpenDocument)]
    fn js_open_document(name: &str, bytes: &Uint8Array, revoke_after_ms: u32) -> Promise;
    #[wasm_bindgen(js_name = jsClipboardWrite)]
    fn js_clipboard_write(text: &str) -> Promise;
    #[wasm_bindgen(js_name = jsClipboardFallback, catch)]
    fn js_clipboard_fallback(text: &str) -> Result<(), JsValue>;
}

async fn await_promise(promise: Promise) -> Result<JsValue, JsValue> {
    JsFuture::from(promise).await
}

fn js_error_to_string(err: &JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    if let Ok(message) = js_sys::Reflect::get(err, &JsValue::from_str("message")) {
        if let Some(text) = message.as_string() {
            return text;
        }
    }
    format!("{err:?}")
}

/// Maps a rejected File System Access promise to a [`HandleError`] by `DOMException` name.
fn handle_error(err: JsValue) -> HandleError {
    let name = js_sys::Reflect::get(&err, &JsValue::from_str("name"))
        .ok()
        .and_then(|name| name.as_string());
    let message = js_error_to_string(&err);
    match name.as_deref() {
        Some("NotAllowedError") | Some("SecurityError") => HandleError::PermissionDenied(message),
        Some("NotFoundError") => HandleError::NotFound(message),
        Some("AbortError") => HandleError::Aborted,
        Some("NotSupportedError") | Some("TypeError") => HandleError::Unsupported(message),
        _ => HandleError::Io(message),
    }
}

async fn handle_call(promise: Promise) -> Result<JsValue, HandleError> {
    await_promise(promise).await.map_err(handle_error)
}

async fn string_call(promise: Promise) -> Result<JsValue, String> {
    await_promise(promise)
        .await
        .map_err(|err| js_error_to_string(&err))
}

pub async fn load_folder() -> Result<Option<Rc<dyn DirectoryHandle>>, String> {
    let value = string_call(js_load_folder()).await?;
    if value.is_null() || value.is_undefined() {
        return Ok(None);
    }
    Ok(Some(Rc::new(WebDirectoryHandle::new(value))))
}

pub async fn save_folder(folder: &dyn DirectoryHandle) -> Result<(), String> {
    let web = folder
        .as_any()
        .downcast_ref::<WebDirectoryHandle>()
        .ok_or_else(|| "only browser directory handles can be remembered".to_string())?;
    string_call(js_save_folder(web.js_value())).await?;
    Ok(())
}

pub async fn cache_get_text(key: &str) -> Result<Option<String>, String> {
    let value = string_call(js_cache_get(key)).await?;
    if value.is_null() || value.is_undefined() {
        return Ok(None);
    }
    let json: serde_json::Value = from_value(value).map_err(|e| e.to_string())?;
    serde_json::to_string(&json).map(Some).map_err(|e| e.to_string())
}

pub async fn cache_put_text(key: &str, raw_json: &str) -> Result<(), String> {
    let json: serde_json::Value = serde_json::from_str(raw_json).map_err(|e| e.to_string())?;
    let value = json
        .serialize(&Serializer::json_compatible())
        .map_err(|e| e.to_string())?;
    string_call(js_cache_put(key, value)).await?;
    Ok(())
}

pub fn handle_name(handle: &JsValue) -> String {
    js_handle_name(handle)
}

pub fn is_directory_handle(handle: &JsValue) -> bool {
    js_handle_kind(handle) == "directory"
}

pub fn supports_move(handle: &JsValue) -> bool {
    js_supports_move(handle)
}

async fn permission_call(promise: Promise) -> Result<PermissionState, HandleError> {
    let value = handle_call(promise).await?;
    from_value(value).map_err(|e| HandleError::Io(e.to_string()))
}

pub async fn query_permission(
    handle: &JsValue,
    mode: PermissionMode,
) -> Result<PermissionState, HandleError> {
    permission_call(js_query_permission(handle, mode.as_str())).await
}

pub async fn request_permission(
    handle: &JsValue,
    mode: PermissionMode,
) -> Result<PermissionState, HandleError> {
    permission_call(js_request_permission(handle, mode.as_str())).await
}

pub async fn children(handle: &JsValue) -> Result<Vec<JsValue>, HandleError> {
    let value = handle_call(js_children(handle)).await?;
    Ok(Array::from(&value).iter().collect())
}

pub async fn directory(handle: &JsValue, name: &str) -> Result<JsValue, HandleError> {
    handle_call(js_directory(handle, name)).await
}

pub async fn file(handle: &JsValue, name: &str, create: bool) -> Result<JsValue, HandleError> {
    handle_call(js_file(handle, name, create)).await
}

pub async fn remove_entry(handle: &JsValue, name: &str, recursive: bool) -> Result<(), HandleError> {
    handle_call(js_remove_entry(handle, name, recursive)).await?;
    Ok(())
}

pub async fn move_entry(handle: &JsValue, name: &str) -> Result<(), HandleError> {
    handle_call(js_move(handle, name)).await?;
    Ok(())
}

pub async fn last_modified(handle: &JsValue) -> Result<u64, HandleError> {
    let value = handle_call(js_last_modified(handle)).await?;
    value
        .as_f64()
        .map(|ms| ms.max(0.0) as u64)
        .ok_or_else(|| HandleError::Io("lastModified is not a number".to_string()))
}

pub async fn read_file(handle: &JsValue) -> Result<Vec<u8>, HandleError> {
    let value = handle_call(js_read_file(handle)).await?;
    Ok(Uint8Array::new(&value).to_vec())
}

pub async fn write_file(handle: &JsValue, bytes: &[u8]) -> Result<(), HandleError> {
    let bytes = Uint8Array::from(bytes);
    handle_call(js_write_file(handle, &bytes)).await?;
    Ok(())
}

pub async fn pick_directory() -> Result<Rc<dyn DirectoryHandle>, HandleError> {
    let value = handle_call(js_pick_directory()).await?;
    Ok(Rc::new(WebDirectoryHandle::new(value)))
}

pub async fn open_helper_window(width: u32, height: u32) -> Result<(), String> {
    string_call(js_open_helper_window(width, height)).await?;
    Ok(())
}

pub async fn open_document(name: &str, bytes: &[u8], revoke_after_ms: u32) -> Result<(), String> {
    let bytes = Uint8Array::from(bytes);
    string_call(js_open_document(name, &bytes, revoke_after_ms)).await?;
    Ok(())
}

pub async fn clipboard_write(text: &str) -> Result<(), String> {
    string_call(js_clipboard_write(text)).await?;
    Ok(())
}

pub async fn clipboard_write_fallback(text: &str) -> Result<(), String> {
    js_clipboard_fallback(text).map_err(|err| js_error_to_string(&err))
}
