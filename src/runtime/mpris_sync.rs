use std::path::Path;

use crate::mpris::MprisHandle;
use crate::player::Player;

pub fn update_mpris(mpris: &MprisHandle, player: &Player, music_root: &Path) {
    mpris.set_track_metadata(player.current(), music_root);
    mpris.set_playback(player.playback_state());
}
