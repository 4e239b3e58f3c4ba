//! UI reflector
//! Shows one of the two panel states.

use log::debug;

use crate::ui::elements::Elements;
use crate::ui::labels::Labels;

/// Shows the controls for one of the two panel states.
///
/// Connected: connect button hidden, disconnect button and LED controls
/// visible. Disconnected: the reverse. The status line shows the matching
/// label. Calling it again with the same flag changes nothing.
pub fn reflect(elements: &Elements, connected: bool, labels: &Labels) {
    debug!("Reflecting {} state", labels.status(connected));
    elements.connect_btn.set_hidden(connected);
    elements.disconnect_btn.set_hidden(!connected);
    elements.controls.set_hidden(!connected);
    elements.status.set_text(labels.status(connected));
}
