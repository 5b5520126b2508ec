//! # Todo List Core
//!
//! The state and persistence core of a todo list widget, built to be embedded
//! behind a rendering layer (Flutter, a webview shell, a native UI) through a
//! C-compatible interface, or used directly from Rust.
//!
//! ## Features
//!
//! - **Ordered item store**: add, toggle, rename and delete short text items
//! - **Rename session**: one in-progress edit with a draft, committed or cancelled
//! - **Durable mirror**: the whole list is written to one LMDB slot after every change
//!   and restored on startup; unreadable data starts an empty list instead of failing
//! - **Collision-free ids**: millisecond ids that never repeat, even within one tick
//!
//! ## Quick Start
//!
//! ```no_run
//! use todo_list_core::config::TodoListConfig;
//! use todo_list_core::todo_list::TodoList;
//!
//! let mut list = TodoList::open(&TodoListConfig::with_db_name("my_list"))?;
//! if let Some(id) = list.create("water the plants") {
//!     list.toggle(&id);
//! }
//! # Ok::<(), todo_list_core::app_response::AppResponse>(())
//! ```
//!
//! ## FFI Functions
//!
//! Every function taking a list returns a JSON [`AppResponse`]; `Ok` carries the
//! current [`ListSnapshot`](todo_list::ListSnapshot). Free returned strings with
//! [`free_c_string`].
//!
//! - [`create_todo_list`] / [`create_todo_list_with_config`] - Open a list
//! - [`todo_get_state`] - Current items and edit state
//! - [`todo_create`], [`todo_delete`], [`todo_toggle`] - Item operations
//! - [`todo_begin_edit`], [`todo_update_draft`], [`todo_commit_edit`], [`todo_cancel_edit`] - Rename session
//! - [`todo_clear`] - Remove every item
//! - [`todo_reset`] - Recreate the database and start an empty list
//! - [`todo_close`] - Flush and release the list

pub mod app_response;
pub mod config;
pub mod edit_session;
pub mod id_generator;
pub mod item_store;
pub mod local_db_state;
pub mod persistence;
pub mod slot_storage;
pub mod todo_item;
pub mod todo_list;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use log::{info, warn};

use crate::app_response::AppResponse;
use crate::config::TodoListConfig;
use crate::todo_list::TodoList;

/// Opens the list stored in `<name>.lmdb`, creating it if needed.
///
/// # Returns
///
/// A pointer to the [`TodoList`], or null if `name` is null, not UTF-8, or the
/// database cannot be opened. Release it with [`todo_close`].
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use todo_list_core::create_todo_list;
///
/// let name = CString::new("groceries").unwrap();
/// let list = create_todo_list(name.as_ptr());
/// assert!(!list.is_null());
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_todo_list(name: *const c_char) -> *mut TodoList {
    let name_str = match c_ptr_to_owned(name) {
        Some(s) => s,
        None => {
            warn!("Null or invalid name passed to create_todo_list");
            return std::ptr::null_mut();
        }
    };

    open_list(&TodoListConfig::with_db_name(name_str))
}

/// Opens a list from a JSON [`TodoListConfig`]; omitted fields take their defaults.
///
/// ```json
/// { "db_name": "groceries", "storage_key": "todos" }
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_todo_list_with_config(config_json: *const c_char) -> *mut TodoList {
    let json = match c_ptr_to_owned(config_json) {
        Some(s) => s,
        None => {
            warn!("Null or invalid config passed to create_todo_list_with_config");
            return std::ptr::null_mut();
        }
    };

    match serde_json::from_str::<TodoListConfig>(json.as_str()) {
        Ok(config) => open_list(&config),
        Err(e) => {
            warn!("Invalid list config: {e}");
            std::ptr::null_mut()
        }
    }
}

fn open_list(config: &TodoListConfig) -> *mut TodoList {
    match TodoList::open(config) {
        Ok(list) => {
            info!("✅ List '{}' opened with {} items", config.db_name, list.len());
            Box::into_raw(Box::new(list))
        }
        Err(e) => {
            warn!("❌ Failed to open list at {}: {e}", config.lmdb_dir());
            std::ptr::null_mut()
        }
    }
}

/// Returns the current snapshot without changing anything.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn todo_get_state(list: *mut TodoList) -> *const c_char {
    let list = match list_mut(list, "todo_get_state") {
        Ok(list) => list,
        Err(err) => return err,
    };
    snapshot_response(list)
}

/// Appends an item. Blank text changes nothing and still answers with the snapshot.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn todo_create(list: *mut TodoList, text: *const c_char) -> *const c_char {
    let list = match list_mut(list, "todo_create") {
        Ok(list) => list,
        Err(err) => return err,
    };
    let text = match c_ptr_to_string(text, "text") {
        Ok(text) => text,
        Err(err) => return err,
    };

    list.create(&text);
    snapshot_response(list)
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn todo_delete(list: *mut TodoList, id: *const c_char) -> *const c_char {
    let list = match list_mut(list, "todo_delete") {
        Ok(list) => list,
        Err(err) => return err,
    };
    let id = match c_ptr_to_string(id, "id") {
        Ok(id) => id,
        Err(err) => return err,
    };

    list.delete(&id);
    snapshot_response(list)
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn todo_toggle(list: *mut TodoList, id: *const c_char) -> *const c_char {
    let list = match list_mut(list, "todo_toggle") {
        Ok(list) => list,
        Err(err) => return err,
    };
    let id = match c_ptr_to_string(id, "id") {
        Ok(id) => id,
        Err(err) => return err,
    };

    list.toggle(&id);
    snapshot_response(list)
}

/// Starts renaming `id`; the snapshot's `draft_text` holds the item's text.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn todo_begin_edit(list: *mut TodoList, id: *const c_char) -> *const c_char {
    let list = match list_mut(list, "todo_begin_edit") {
        Ok(list) => list,
        Err(err) => return err,
    };
    let id = match c_ptr_to_string(id, "id") {
        Ok(id) => id,
        Err(err) => return err,
    };

    list.begin_edit(&id);
    snapshot_response(list)
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn todo_update_draft(list: *mut TodoList, text: *const c_char) -> *const c_char {
    let list = match list_mut(list, "todo_update_draft") {
        Ok(list) => list,
        Err(err) => return err,
    };
    let text = match c_ptr_to_string(text, "text") {
        Ok(text) => text,
        Err(err) => return err,
    };

    list.update_draft(&text);
    snapshot_response(list)
}

/// Applies the draft. A blank draft keeps the edit open.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn todo_commit_edit(list: *mut TodoList) -> *const c_char {
    let list = match list_mut(list, "todo_commit_edit") {
        Ok(list) => list,
        Err(err) => return err,
    };

    list.commit_edit();
    snapshot_response(list)
}

#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn todo_cancel_edit(list: *mut TodoList) -> *const c_char {
    let list = match list_mut(list, "todo_cancel_edit") {
        Ok(list) => list,
        Err(err) => return err,
    };

    list.cancel_edit();
    snapshot_response(list)
}

/// Removes every item from the list.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn todo_clear(list: *mut TodoList) -> *const c_char {
    let list = match list_mut(list, "todo_clear") {
        Ok(list) => list,
        Err(err) => return err,
    };

    list.clear_all();
    snapshot_response(list)
}

/// Deletes the database from disk, recreates it and answers with the empty snapshot.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn todo_reset(list: *mut TodoList) -> *const c_char {
    let list = match list_mut(list, "todo_reset") {
        Ok(list) => list,
        Err(err) => return err,
    };

    match list.reset() {
        Ok(()) => snapshot_response(list),
        Err(e) => {
            let error = AppResponse::DatabaseError(format!("Error resetting list: {e}"));
            response_to_c_string(&error)
        }
    }
}

/// Flushes the database and frees the list. The pointer must not be used afterwards.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn todo_close(list: *mut TodoList) -> *const c_char {
    if list.is_null() {
        let error = AppResponse::BadRequest("Null list pointer passed to todo_close".to_string());
        return response_to_c_string(&error);
    }

    let mut list = unsafe { Box::from_raw(list) };
    match list.close() {
        Ok(()) => response_to_c_string(&AppResponse::success("List closed successfully")),
        Err(e) => response_to_c_string(&e),
    }
}

/// Frees a string returned by any function of this library.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn free_c_string(ptr: *const c_char) {
    if ptr.is_null() {
        return;
    }
    unsafe {
        drop(CString::from_raw(ptr as *mut c_char));
    }
}

fn snapshot_response(list: &TodoList) -> *const c_char {
    match serde_json::to_string(&list.snapshot()) {
        Ok(json) => response_to_c_string(&AppResponse::Ok(json)),
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

fn list_mut<'a>(list: *mut TodoList, fn_name: &str) -> Result<&'a mut TodoList, *const c_char> {
    match unsafe { list.as_mut() } {
        Some(list) => Ok(list),
        None => {
            let error = AppResponse::BadRequest(format!("Null list pointer passed to {fn_name}"));
            Err(response_to_c_string(&error))
        }
    }
}

/// Serializes `response` to JSON in a heap C string, null if that fails.
fn response_to_c_string(response: &AppResponse) -> *const c_char {
    let json = match serde_json::to_string(response) {
        Ok(j) => j,
        Err(e) => {
            warn!("Error serializing response: {e}");
            return std::ptr::null();
        }
    };

    match CString::new(json) {
        Ok(c_str) => c_str.into_raw(),
        Err(e) => {
            warn!("Error creating CString: {e}");
            std::ptr::null()
        }
    }
}

fn c_ptr_to_owned(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok().map(str::to_string)
}

/// Converts a C string argument, answering `BadRequest` for null or invalid UTF-8.
fn c_ptr_to_string(ptr: *const c_char, field_name: &str) -> Result<String, *const c_char> {
    if ptr.is_null() {
        let error = AppResponse::BadRequest(format!("Null {field_name} pointer"));
        return Err(response_to_c_string(&error));
    }

    match unsafe { CStr::from_ptr(ptr).to_str() } {
        Ok(s) => Ok(s.to_string()),
        Err(e) => {
            let error = AppResponse::BadRequest(format!("Invalid UTF-8 in {field_name}: {e}"));
            Err(response_to_c_string(&error))
        }
    }
}
