//! Background texture reload: file picker and decoding run on the IO task pool,
//! the result is applied to the session on the next fixed tick.

use std::path::PathBuf;

use bevy::prelude::*;
use bevy::tasks::{IoTaskPool, Task};
use futures_lite::future;

use crate::texture_pool::decode_files;
use crate::utils::constants::game_constants::TEXTURE_EXTENSIONS;
use crate::utils::objects::{PendingTextureLoad, PickedTextures, RandomGen, RollSession};

/// Opens the native file picker and decodes the chosen images off the main thread.
/// A cancelled or empty pick yields `None`.
pub fn spawn_texture_reload() -> Task<PickedTextures> {
    let task_pool = IoTaskPool::get();
    task_pool.spawn(async move {
        let files = rfd::AsyncFileDialog::new()
            .add_filter("Images", &TEXTURE_EXTENSIONS)
            .set_title("Select cube textures")
            .pick_files()
            .await
            .filter(|files| !files.is_empty());
        let Some(files) = files else {
            return None;
        };

        let paths: Vec<PathBuf> = files
            .iter()
            .map(|file| file.path().to_path_buf())
            .collect();
        Some(decode_files(&paths))
    })
}

/// Polls the reload task and, once finished, swaps the pool and re-deals the faces.
pub fn apply_loaded_textures(
    mut pending: ResMut<PendingTextureLoad>,
    mut session: ResMut<RollSession>,
    mut random_gen: ResMut<RandomGen>,
) {
    let Some(task) = pending.task.as_mut() else {
        return;
    };
    let Some(picked) = future::block_on(future::poll_once(task)) else {
        return;
    };
    pending.task = None;

    session.apply_reload(picked, &mut random_gen.random_gen);
}
