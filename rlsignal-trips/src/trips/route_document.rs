use std::io::Write;

use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, Event},
    Writer,
};

use super::{TripEvent, TripsError, VehicleClass};

pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const ROUTES_SCHEMA_LOCATION: &str = "http://sumo.dlr.de/xsd/routes_file.xsd";
const INDENT_SIZE: usize = 2;

/// writes a SUMO trips document: the vehicle type declarations followed by one
/// `<trip>` element per event, in the order given.
///
/// returns the sink once the closing `</routes>` tag is written.
pub fn write_routes_document<W: Write>(trips: &[TripEvent], sink: W) -> Result<W, TripsError> {
    let mut writer = Writer::new_with_indent(sink, b' ', INDENT_SIZE);
    write_event(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;

    let mut root = BytesStart::new("routes");
    root.push_attribute(("xmlns:xsi", XSI_NAMESPACE));
    root.push_attribute(("xsi:noNamespaceSchemaLocation", ROUTES_SCHEMA_LOCATION));
    write_event(&mut writer, Event::Start(root))?;

    for vehicle_class in VehicleClass::ALL {
        let mut v_type = BytesStart::new("vType");
        v_type.push_attribute(("id", vehicle_class.type_id()));
        v_type.push_attribute(("vClass", vehicle_class.v_class()));
        v_type.push_attribute(("guiShape", vehicle_class.gui_shape()));
        v_type.push_attribute(("color", vehicle_class.color()));
        write_event(&mut writer, Event::Empty(v_type))?;
    }

    for trip in trips.iter() {
        let id = trip.id();
        let depart = trip.depart_attribute();
        let mut element = BytesStart::new("trip");
        element.push_attribute(("id", id.as_str()));
        element.push_attribute(("depart", depart.as_str()));
        element.push_attribute(("from", trip.source.as_str()));
        element.push_attribute(("to", trip.destination.as_str()));
        element.push_attribute(("type", trip.vehicle_class.type_id()));
        write_event(&mut writer, Event::Empty(element))?;
    }

    write_event(&mut writer, Event::End(BytesEnd::new("routes")))?;
    let mut sink = writer.into_inner();
    sink.write_all(b"\n")
        .map_err(|e| TripsError::XmlWrite(e.to_string()))?;
    Ok(sink)
}

/// renders the trips document in memory.
pub fn routes_document_string(trips: &[TripEvent]) -> Result<String, TripsError> {
    let bytes = write_routes_document(trips, Vec::new())?;
    String::from_utf8(bytes)
        .map_err(|e| TripsError::Internal(format!("route document is not valid UTF-8: {e}")))
}

fn write_event<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<(), TripsError> {
    writer
        .write_event(event)
        .map_err(|e| TripsError::XmlWrite(e.to_string()))
}
