// Draw-sink interface between the engine and whatever renders it
//
// The engine reports cells once a search has finished. Every hook defaults
// to a no-op so implementors override only what they actually render; an
// absent observer is simply `None` at the injection point.

/// Capability set invoked with grid coordinates after a search completes.
pub trait SearchObserver {
    /// A cell still on the open frontier when the search terminated
    fn on_open_cell(&mut self, _x: i32, _y: i32) {}

    /// A fully expanded cell
    fn on_closed_cell(&mut self, _x: i32, _y: i32) {}

    /// A cell on the accepted path, endpoints included
    fn on_path_cell(&mut self, _x: i32, _y: i32) {}

    /// An obstacle cell
    fn on_wall_cell(&mut self, _x: i32, _y: i32) {}

    /// All cells for this search have been reported
    fn on_frame_presented(&mut self) {}
}
