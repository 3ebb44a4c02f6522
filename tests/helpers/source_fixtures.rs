//! Common definition sources for tests.

/// R → S → U, with properties declared at several levels.
pub const CASCADE_CHAIN: &str = r#"
Type("R") {
    addProperty("x", "1");
    addProperty("Icon", "RootIcon");
}
Type("S") {
    setParentType("R");
    addProperty("x", "2");
}
Type("U") {
    setParentType("S");
}
"#;

/// R declares A; S re-declares A and adds B.
pub const DUPLICATE_ATTRIBUTE: &str = r#"
Type("R") {
    addAttribute("A") {
        setAttributeType("String");
        setSQLTable("T_R");
        setSQLColumn("A");
    }
}
Type("S") {
    setParentType("R");
    addAttribute("A") {
        setAttributeType("Integer");
        setSQLTable("T_S");
        setSQLColumn("A2");
    }
    addAttribute("B") {
        setAttributeType("Date");
        setSQLTable("T_S");
        setSQLColumn("B");
    }
}
"#;

pub const INHERITANCE_CYCLE: &str = r#"
Type("A") { setParentType("B"); }
Type("B") { setParentType("A"); }
"#;

/// Menu M lists X, Y, Z in that order.
pub const ORDERED_MENU: &str = r#"
Menu("M") {
    addChild(CommandRef("X"));
    addChild(MenuRef("Y"));
    addChild(CommandRef("Z"));
}
Command("X") { }
Menu("Y") { }
Command("Z") { }
"#;

/// Menus A and B list each other; C is an unrelated sibling.
pub const MENU_CYCLE: &str = r#"
Menu("A") { addChild(MenuRef("B")); }
Menu("B") { addChild(MenuRef("A")); }
Menu("C") { addChild(CommandRef("C_Open")); }
Command("C_Open") { }
"#;

/// A small but complete administration module, one block per entry.
pub const SALES_MODULE: &[&str] = &[
    r#"
Type("Sales_DocumentAbstract") {
    addProperty("Icon", "Document");
    addProperty("Label", "Document");
    addAttribute("Number") {
        setAttributeType("String");
        setSQLTable("T_SALESDOC");
        setSQLColumn("NUMBER");
    }
    addAttribute("Contact") {
        setAttributeType("Link");
        setSQLTable("T_SALESDOC");
        setSQLColumn("CONTACT");
        setTypeLink("Contacts_Contact");
    }
}
"#,
    r#"
Type("Sales_Invoice") {
    setUUID("fe9d94fd-2ed8-4c44-b1f0-6ba1a2f5ae4f");
    setParentType("Sales_DocumentAbstract");
    addProperty("Label", "Invoice");
    addAttribute("DueDate") {
        setAttributeType("Date");
        setSQLTable("T_INVOICE");
        setSQLColumn("DUEDATE");
    }
}
"#,
    r#"
Type("Contacts_Contact") {
    addProperty("Icon", "Contact");
}
"#,
    r#"
Table("Sales_InvoiceTable") {
    addProperty("Columns", "Number;DueDate;Contact");
}
"#,
    r#"
Form("Sales_InvoiceForm") { }
"#,
    r#"
Command("Sales_InvoiceSearch") {
    addIcon("Search");
    addTargetTable("Sales_InvoiceTable");
    addTargetForm("Sales_InvoiceForm");
    addProperty("Target", "content");
    addProperty("TargetMode", "view");
    addProperty("TargetQueryTypes", "Sales_Invoice");
    addProperty("TargetExpand", "Sales_Invoice\Contact");
}
"#,
    r#"
Menu("Sales_Menu") {
    addIcon("Sales");
    addChild(CommandRef("Sales_InvoiceSearch"));
    addChild(MenuRef("Sales_ReportsMenu"));
}
"#,
    r#"
Menu("Sales_ReportsMenu") {
    addChild(CommandRef("Sales_InvoiceSearch"));
}
"#,
];
