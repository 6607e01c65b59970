/// A discrete user command, produced by [`crate::input::map_event`] and
/// consumed by [`crate::app::App::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit, asking for confirmation when something is selected.
    Quit,
    /// Quit immediately (Ctrl+C).
    ForceQuit,
    MoveUp,
    MoveDown,
    GoTop,
    GoBottom,
    PrevPage,
    NextPage,
    /// Select/deselect the row under the cursor.
    ToggleRow,
    /// Open the "select N rows" overlay.
    OpenSelectCount,
    /// Open the detail popup for the row under the cursor.
    DrillIn,
    NavigateBack,
    ToggleHelp,

    // Text input (select-count overlay)
    TextInput(char),
    TextBackspace,
    TextDelete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    TextConfirm,
    TextCancel,

    ClickAt(u16, u16),
    Tick,
    None,
}
