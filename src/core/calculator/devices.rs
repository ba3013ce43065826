use crate::models::event::Event;
use serde::Serialize;

/// Events of one reader, oldest first.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceSection {
    pub device_id: String,
    pub events: Vec<Event>,
}

/// Regroup events per device (ascending device id), each group in record order.
pub fn group_by_device(mut events: Vec<Event>) -> Vec<DeviceSection> {
    events.sort_by(|a, b| {
        a.device_id
            .cmp(&b.device_id)
            .then(a.record_number.cmp(&b.record_number))
    });

    let mut sections: Vec<DeviceSection> = Vec::new();
    for ev in events {
        match sections.last_mut() {
            Some(last) if last.device_id == ev.device_id => last.events.push(ev),
            _ => sections.push(DeviceSection {
                device_id: ev.device_id.clone(),
                events: vec![ev],
            }),
        }
    }
    sections
}
