//! File-input interop for buffering picked upload payloads.

use backend_host::PickedFile;

/// Returns the first file currently selected in `input`, if any.
pub fn selected_file(input: &web_sys::HtmlInputElement) -> Option<web_sys::File> {
    input.files().and_then(|files| files.get(0))
}

/// Reads `file` fully into memory and returns it as a [`PickedFile`].
pub async fn read_picked_file(file: &web_sys::File) -> Result<PickedFile, String> {
    let bytes = read_file_bytes(file).await?;
    Ok(PickedFile {
        name: file.name(),
        content_type: file.type_(),
        bytes,
    })
}

#[cfg(target_arch = "wasm32")]
async fn read_file_bytes(file: &web_sys::File) -> Result<Vec<u8>, String> {
    use std::{cell::RefCell, rc::Rc};

    use futures::channel::oneshot;
    use wasm_bindgen::{closure::Closure, JsCast};

    let reader = web_sys::FileReader::new().map_err(|err| format!("{err:?}"))?;
    let (tx, rx) = oneshot::channel::<Result<Vec<u8>, String>>();
    let sender = Rc::new(RefCell::new(Some(tx)));

    let reader_for_load = reader.clone();
    let load_sender = sender.clone();
    let on_load = Closure::<dyn FnMut(web_sys::ProgressEvent)>::wrap(Box::new(move |_| {
        let result = reader_for_load
            .result()
            .map_err(|err| format!("failed to read file: {err:?}"))
            .and_then(|value| {
                value
                    .dyn_into::<js_sys::ArrayBuffer>()
                    .map(|buffer| js_sys::Uint8Array::new(&buffer).to_vec())
                    .map_err(|_| "file reader returned a non-buffer result".to_string())
            });
        if let Some(tx) = load_sender.borrow_mut().take() {
            let _ = tx.send(result);
        }
    }));
    reader.set_onload(Some(on_load.as_ref().unchecked_ref()));

    let error_sender = sender.clone();
    let on_error = Closure::<dyn FnMut(web_sys::ProgressEvent)>::wrap(Box::new(move |_| {
        if let Some(tx) = error_sender.borrow_mut().take() {
            let _ = tx.send(Err("failed to load file".to_string()));
        }
    }));
    reader.set_onerror(Some(on_error.as_ref().unchecked_ref()));

    reader
        .read_as_array_buffer(file)
        .map_err(|err| format!("failed to start file read: {err:?}"))?;

    let result = rx
        .await
        .map_err(|_| "file read was interrupted".to_string())?;
    on_load.forget();
    on_error.forget();
    result
}

#[cfg(not(target_arch = "wasm32"))]
async fn read_file_bytes(_file: &web_sys::File) -> Result<Vec<u8>, String> {
    Err("file reading is only available when compiled for wasm32".to_string())
}
