//! Plural forms of application names for `Depend On` values

/// Known hardware/application names and their plural forms
const PLURAL_TABLE: &[(&str, &str)] = &[
    ("Laptop", "Laptops"),
    ("Desktop", "Desktops"),
    ("Docking station", "Docking stations"),
    ("Printer", "Printers"),
    ("Barcode printer", "Barcode printers"),
    ("Barcode scanner", "Barcode scanners"),
    ("Display", "Displays"),
    ("Deskphone", "Deskphones"),
    ("Smartphone", "Smartphones"),
    ("Mouse", "Mouses"),
    ("Keyboard", "Keyboards"),
    ("Headset", "Headsets"),
    ("Tablet", "Tablets"),
    ("Audio equipment", "Audio equipment"),
    ("Video surveillance", "Video surveillance"),
    ("UPS", "UPS"),
    ("External webcam", "External webcams"),
    ("Projector", "Projectors"),
    ("External storage device", "External storage devices"),
    ("Microphone", "Microphones"),
    ("Other hardware", "Other hardware"),
    ("Server", "Servers"),
    ("Router", "Routers"),
    ("Switch", "Switches"),
    ("Firewall", "Firewalls"),
    ("Access point", "Access points"),
    ("Scanner", "Scanners"),
    ("Webcam", "Webcams"),
    ("Camera", "Cameras"),
    ("Monitor", "Monitors"),
    ("Speaker", "Speakers"),
    ("Cable", "Cables"),
    ("Adapter", "Adapters"),
];

/// Convert an application name to its plural form
///
/// Lookup is exact first, then case-insensitive. Names missing from the
/// table (`Outlook`, `SAP`) are returned unchanged.
pub fn pluralize_app_name(app: &str) -> String {
    let trimmed = app.trim();

    if let Some((_, plural)) = PLURAL_TABLE.iter().find(|(single, _)| *single == trimmed) {
        return plural.to_string();
    }

    PLURAL_TABLE
        .iter()
        .find(|(single, _)| single.eq_ignore_ascii_case(trimmed))
        .map(|(_, plural)| plural.to_string())
        .unwrap_or_else(|| trimmed.to_string())
}
