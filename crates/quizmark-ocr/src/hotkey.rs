use anyhow::{Context, Result};
use global_hotkey::{
    GlobalHotKeyEvent, GlobalHotKeyManager,
    hotkey::{Code, HotKey, Modifiers},
};

pub struct HotkeyManager {
    manager: GlobalHotKeyManager,
    hotkey: HotKey,
}

impl HotkeyManager {
    /// Create a new hotkey manager with Ctrl+Shift+Q
    pub fn new() -> Result<Self> {
        Self::with_hotkey(Some(Modifiers::CONTROL | Modifiers::SHIFT), Code::KeyQ)
    }

    /// Create with custom hotkey
    pub fn with_hotkey(modifiers: Option<Modifiers>, code: Code) -> Result<Self> {
        let manager = GlobalHotKeyManager::new().context("Failed to create hotkey manager")?;

        let hotkey = HotKey::new(modifiers, code);

        manager
            .register(hotkey)
            .context("Failed to register hotkey")?;

        Ok(Self { manager, hotkey })
    }

    /// Check if hotkey was pressed (non-blocking)
    pub fn poll(&self) -> bool {
        let receiver = GlobalHotKeyEvent::receiver();
        match receiver.try_recv() {
            Ok(event) => event.id == self.hotkey.id(),
            Err(_) => false,
        }
    }

    /// Wait for hotkey press (blocking)
    pub fn wait(&self) -> Result<()> {
        let receiver = GlobalHotKeyEvent::receiver();
        loop {
            let event = receiver.recv().context("Failed to receive event")?;
            if event.id == self.hotkey.id() {
                return Ok(());
            }
        }
    }

    /// Get the hotkey ID for matching events
    pub fn id(&self) -> u32 {
        self.hotkey.id()
    }
}

impl Drop for HotkeyManager {
    fn drop(&mut self) {
        let _ = self.manager.unregister(self.hotkey);
    }
}
