//! Identifiers of the object types shipped with a stock i-doit installation.
//!
//! Custom object types use their own constants; these are the built-in ones
//! and are mostly useful to parameterise fixtures.

pub const SERVICE: &str = "C__OBJTYPE__SERVICE";
pub const SYSTEM_SERVICE: &str = "C__OBJTYPE__SYSTEM_SERVICE";
pub const APPLICATION: &str = "C__OBJTYPE__APPLICATION";
pub const BUILDING: &str = "C__OBJTYPE__BUILDING";
pub const ENCLOSURE: &str = "C__OBJTYPE__ENCLOSURE";
pub const SERVER: &str = "C__OBJTYPE__SERVER";
pub const SWITCH: &str = "C__OBJTYPE__SWITCH";
pub const ROUTER: &str = "C__OBJTYPE__ROUTER";
pub const FC_SWITCH: &str = "C__OBJTYPE__FC_SWITCH";
pub const SAN: &str = "C__OBJTYPE__SAN";
pub const CLIENT: &str = "C__OBJTYPE__CLIENT";
pub const PRINTER: &str = "C__OBJTYPE__PRINTER";
pub const AIR_CONDITION: &str = "C__OBJTYPE__AIR_CONDITION";
pub const ACCESS_POINT: &str = "C__OBJTYPE__ACCESS_POINT";
pub const MONITOR: &str = "C__OBJTYPE__MONITOR";
pub const ROOM: &str = "C__OBJTYPE__ROOM";
pub const EPS: &str = "C__OBJTYPE__EPS";
pub const DATABASE_SCHEMA: &str = "C__OBJTYPE__DATABASE_SCHEMA";
pub const PDU: &str = "C__OBJTYPE__PDU";
pub const UPS: &str = "C__OBJTYPE__UPS";
pub const WAN: &str = "C__OBJTYPE__WAN";
pub const EMERGENCY_PLAN: &str = "C__OBJTYPE__EMERGENCY_PLAN";
pub const FILE: &str = "C__OBJTYPE__FILE";
pub const LICENCE: &str = "C__OBJTYPE__LICENCE";
pub const CONTAINER: &str = "C__OBJTYPE__CONTAINER";
pub const TELEPHONE_SYSTEM: &str = "C__OBJTYPE__TELEPHONE_SYSTEM";
pub const PHONE: &str = "C__OBJTYPE__PHONE";
pub const CELL_PHONE_CONTRACT: &str = "C__OBJTYPE__CELL_PHONE_CONTRACT";
pub const OPERATING_SYSTEM: &str = "C__OBJTYPE__OPERATING_SYSTEM";
pub const MIDDLEWARE: &str = "C__OBJTYPE__MIDDLEWARE";
pub const NAGIOS_SERVICE: &str = "C__OBJTYPE__NAGIOS_SERVICE";
pub const NAGIOS_SERVICE_TPL: &str = "C__OBJTYPE__NAGIOS_SERVICE_TPL";
pub const NAGIOS_HOST_TPL: &str = "C__OBJTYPE__NAGIOS_HOST_TPL";
pub const VIRTUAL_SERVER: &str = "C__OBJTYPE__VIRTUAL_SERVER";
pub const VIRTUAL_CLIENT: &str = "C__OBJTYPE__VIRTUAL_CLIENT";
pub const VIRTUAL_HOST: &str = "C__OBJTYPE__VIRTUAL_HOST";
pub const VIRTUAL_SWITCH: &str = "C__OBJTYPE__VIRTUAL_SWITCH";
pub const CLUSTER: &str = "C__OBJTYPE__CLUSTER";
pub const CLUSTER_SERVICE: &str = "C__OBJTYPE__CLUSTER_SERVICE";
pub const LAYER3_NET: &str = "C__OBJTYPE__LAYER3_NET";
pub const LAYER2_NET: &str = "C__OBJTYPE__LAYER2_NET";
pub const PERSON: &str = "C__OBJTYPE__PERSON";
pub const PERSON_GROUP: &str = "C__OBJTYPE__PERSON_GROUP";
pub const ORGANIZATION: &str = "C__OBJTYPE__ORGANIZATION";
pub const CABLE: &str = "C__OBJTYPE__CABLE";
pub const CONDUIT: &str = "C__OBJTYPE__CONDUIT";
pub const STORAGE_SYSTEM: &str = "C__OBJTYPE__STORAGE_SYSTEM";
pub const KVM_SWITCH: &str = "C__OBJTYPE__KVM_SWITCH";
pub const PATCH_PANEL: &str = "C__OBJTYPE__PATCH_PANEL";
pub const SIM_CARD: &str = "C__OBJTYPE__SIM_CARD";
pub const SOA_STACK: &str = "C__OBJTYPE__SOA_STACK";
pub const CRYPTO_CARD: &str = "C__OBJTYPE__CRYPTO_CARD";
pub const PARALLEL_RELATION: &str = "C__OBJTYPE__PARALLEL_RELATION";
pub const ESC: &str = "C__OBJTYPE__ESC";
pub const WORKSTATION: &str = "C__OBJTYPE__WORKSTATION";
pub const MAINTENANCE: &str = "C__OBJTYPE__MAINTENANCE";
pub const IT_SERVICE: &str = "C__OBJTYPE__IT_SERVICE";
pub const RELATION: &str = "C__OBJTYPE__RELATION";
pub const REPLICATION: &str = "C__OBJTYPE__REPLICATION";
pub const MIGRATION_OBJECT: &str = "C__OBJTYPE__MIGRATION_OBJECT";
pub const DBMS: &str = "C__OBJTYPE__DBMS";
pub const DATABASE_INSTANCE: &str = "C__OBJTYPE__DATABASE_INSTANCE";
pub const IP_PHONE: &str = "C__OBJTYPE__IP_PHONE";
pub const VOIP_PHONE: &str = "C__OBJTYPE__VOIP_PHONE";
pub const GROUP: &str = "C__OBJTYPE__GROUP";
pub const CABINET: &str = "C__OBJTYPE__CABINET";
pub const REMOTE_MANAGEMENT_CONTROLLER: &str = "C__OBJTYPE__REMOTE_MANAGEMENT_CONTROLLER";
pub const PRINT_SERVER: &str = "C__OBJTYPE__PRINT_SERVER";
pub const CONTRACT: &str = "C__OBJTYPE__CONTRACT";
pub const KRYPTO_CARD: &str = "C__OBJTYPE__KRYPTO_CARD";
pub const DIRECTORY: &str = "C__OBJTYPE__DIRECTORY";
pub const NET_INTERFACE: &str = "C__OBJTYPE__NET_INTERFACE";

/// All built-in object type identifiers.
pub const ALL: &[&str] = &[
    SERVICE,
    SYSTEM_SERVICE,
    APPLICATION,
    BUILDING,
    ENCLOSURE,
    SERVER,
    SWITCH,
    ROUTER,
    FC_SWITCH,
    SAN,
    CLIENT,
    PRINTER,
    AIR_CONDITION,
    ACCESS_POINT,
    MONITOR,
    ROOM,
    EPS,
    DATABASE_SCHEMA,
    PDU,
    UPS,
    WAN,
    EMERGENCY_PLAN,
    FILE,
    LICENCE,
    CONTAINER,
    TELEPHONE_SYSTEM,
    PHONE,
    CELL_PHONE_CONTRACT,
    OPERATING_SYSTEM,
    MIDDLEWARE,
    NAGIOS_SERVICE,
    NAGIOS_SERVICE_TPL,
    NAGIOS_HOST_TPL,
    VIRTUAL_SERVER,
    VIRTUAL_CLIENT,
    VIRTUAL_HOST,
    VIRTUAL_SWITCH,
    CLUSTER,
    CLUSTER_SERVICE,
    LAYER3_NET,
    LAYER2_NET,
    PERSON,
    PERSON_GROUP,
    ORGANIZATION,
    CABLE,
    CONDUIT,
    STORAGE_SYSTEM,
    KVM_SWITCH,
    PATCH_PANEL,
    SIM_CARD,
    SOA_STACK,
    CRYPTO_CARD,
    PARALLEL_RELATION,
    ESC,
    WORKSTATION,
    MAINTENANCE,
    IT_SERVICE,
    RELATION,
    REPLICATION,
    MIGRATION_OBJECT,
    DBMS,
    DATABASE_INSTANCE,
    IP_PHONE,
    VOIP_PHONE,
    GROUP,
    CABINET,
    REMOTE_MANAGEMENT_CONTROLLER,
    PRINT_SERVER,
    CONTRACT,
    KRYPTO_CARD,
    DIRECTORY,
    NET_INTERFACE,
];

pub fn is_known(identifier: &str) -> bool {
    ALL.contains(&identifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_identifiers_are_unique_and_prefixed() {
        let unique: HashSet<_> = ALL.iter().collect();
        assert_eq!(unique.len(), ALL.len());
        assert!(ALL.iter().all(|id| id.starts_with("C__OBJTYPE__")));
    }

    #[test]
    fn test_is_known() {
        assert!(is_known(SERVER));
        assert!(is_known("C__OBJTYPE__LAYER3_NET"));
        assert!(!is_known("C__OBJTYPE__SPACESHIP"));
    }
}
