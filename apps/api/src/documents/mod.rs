// Document intake: CV uploads and job descriptions. Writes go straight to
// the configured stores; nothing here touches matching.

pub mod handlers;
